//! Report header, section banners, key-value panels and paragraphs.

use genpdf::style::Style;
use genpdf::Alignment;

use crate::canvas::Canvas;
use crate::format::PLACEHOLDER;
use crate::model::RiskLevel;
use crate::style::{line_height, palette, risk_color, Token};
use crate::text;

const BANNER_GAP: f64 = 4.0;
const ACCENT_THICKNESS: f64 = 1.5;
const PANEL_ROW_HEIGHT: f64 = 6.0;
const PANEL_LABEL_WIDTH: f64 = 48.0;
const PANEL_PADDING: f64 = 3.0;
const RISK_BANNER_HEIGHT: f64 = 11.0;

/// Space a banner keeps free below itself so it never ends up alone at the bottom of a page.
const BANNER_KEEP_WITH_NEXT: f64 = 14.0;

/// Draws the report header: optional brand mark, title, optional subtitle and an accent rule.
pub fn report_header(canvas: &mut Canvas, brand: Option<&str>, title: &str, subtitle: Option<&str>) {
    let left = canvas.left();
    let right = left + canvas.content_width();

    if let Some(brand) = brand {
        let style = Token::Brand.style();
        let height = line_height(&style);
        let baseline = canvas.y() + height * 0.8;
        canvas.page().text(left, baseline, &brand.to_uppercase(), &style);
        canvas.advance(height);
    }

    let style = Token::Title.style();
    let height = line_height(&style);
    let baseline = canvas.y() + height * 0.8;
    canvas.page().text(left, baseline, title, &style);
    canvas.advance(height);

    if let Some(subtitle) = subtitle {
        let style = Token::Subtitle.style();
        let height = line_height(&style);
        let baseline = canvas.y() + height * 0.8;
        canvas.page().text(left, baseline, subtitle, &style);
        canvas.advance(height);
    }

    canvas.advance(2.0);
    let y = canvas.y();
    canvas
        .page()
        .line((left, y), (right, y), palette::ACCENT, ACCENT_THICKNESS);
    canvas.advance(BANNER_GAP + 2.0);
}

/// Draws a section banner (accent line plus heading) and records it in the outline.
pub fn section_banner(canvas: &mut Canvas, title: &str) {
    let style = Token::Heading.style();
    let height = line_height(&style);
    canvas.ensure_space(height + BANNER_GAP + BANNER_KEEP_WITH_NEXT);
    canvas.mark_section(title);

    let left = canvas.left();
    let y = canvas.y();
    canvas
        .page()
        .line((left, y), (left + 12.0, y), palette::ACCENT, ACCENT_THICKNESS * 2.0);
    canvas.advance(1.5);

    let baseline = canvas.y() + height * 0.8;
    canvas.page().text(left, baseline, title, &style);
    canvas.advance(height);

    let y = canvas.y();
    let right = left + canvas.content_width();
    canvas
        .page()
        .line((left, y), (right, y), palette::RULE, 0.5);
    canvas.advance(BANNER_GAP);
}

/// A label/value pair of a key-value panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelRow {
    /// Text in the left column.
    pub label: String,
    /// Value in the right column; `None` draws a dash.
    pub value: Option<String>,
}

impl PanelRow {
    /// Creates a row; blank values are treated as missing.
    pub fn new(label: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let value = value
            .map(Into::into)
            .filter(|value: &String| !value.trim().is_empty());
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Draws label/value rows over a tinted background; missing values render as a dash.
pub fn key_value_panel(canvas: &mut Canvas, rows: &[PanelRow]) {
    let label_style = Token::Label.style();
    let value_style = Token::Value.style();
    let left = canvas.left();
    let width = canvas.content_width();
    let value_x = left + PANEL_PADDING + PANEL_LABEL_WIDTH;
    let value_width = width - PANEL_LABEL_WIDTH - 2.0 * PANEL_PADDING;

    for row in rows {
        canvas.ensure_space(PANEL_ROW_HEIGHT);
        let y = canvas.y();
        let baseline = y + PANEL_ROW_HEIGHT * 0.68;
        let value = row.value.as_deref().unwrap_or(PLACEHOLDER);
        let value = text::truncate_to_width(value, value_width, &value_style);

        let page = canvas.page();
        page.fill_rect(left, y, width, PANEL_ROW_HEIGHT, palette::ACCENT_TINT);
        page.text(left + PANEL_PADDING, baseline, &row.label, &label_style);
        page.text(value_x, baseline, &value, &value_style);
        canvas.advance(PANEL_ROW_HEIGHT);
    }
    canvas.advance(BANNER_GAP);
}

/// A monetary row of a financial summary.
#[derive(Clone, Debug, PartialEq)]
pub struct AmountRow {
    /// Left aligned caption.
    pub label: String,
    /// Formatted amount, right aligned.
    pub amount: String,
    /// Drawn bold with a rule above, e.g. the revised total.
    pub emphasized: bool,
}

impl AmountRow {
    /// Creates a regular row.
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            emphasized: false,
        }
    }

    /// Marks the row as emphasised and returns it.
    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// Draws label/amount rows with right-aligned amounts.
pub fn amount_rows(canvas: &mut Canvas, rows: &[AmountRow]) {
    let left = canvas.left();
    let width = canvas.content_width();

    for row in rows {
        let style = if row.emphasized {
            Token::Total.style()
        } else {
            Token::Value.style()
        };
        canvas.ensure_space(PANEL_ROW_HEIGHT);
        let y = canvas.y();
        let baseline = y + PANEL_ROW_HEIGHT * 0.68;
        let page = canvas.page();
        if row.emphasized {
            page.line((left, y), (left + width, y), palette::RULE, 0.75);
        }
        page.text(left + PANEL_PADDING, baseline, &row.label, &style);
        page.text_aligned(
            left,
            width - PANEL_PADDING,
            baseline,
            &row.amount,
            &style,
            Alignment::Right,
        );
        canvas.advance(PANEL_ROW_HEIGHT);
    }
    canvas.advance(BANNER_GAP);
}

/// Draws a filled banner colored by the weather risk level.
pub fn risk_banner(canvas: &mut Canvas, level: Option<RiskLevel>, detail: Option<&str>) {
    let style = Token::Banner.style();
    canvas.ensure_space(RISK_BANNER_HEIGHT + BANNER_GAP);
    let left = canvas.left();
    let width = canvas.content_width();
    let y = canvas.y();
    let label = match level {
        Some(level) => format!("SEVERE WEATHER RISK: {}", level.label()),
        None => "SEVERE WEATHER RISK: NOT RATED".to_owned(),
    };
    let baseline = y + RISK_BANNER_HEIGHT * 0.65;

    let page = canvas.page();
    page.fill_rect(left, y, width, RISK_BANNER_HEIGHT, risk_color(level));
    page.text(left + PANEL_PADDING, baseline, &label, &style);
    if let Some(detail) = detail {
        page.text_aligned(
            left,
            width - PANEL_PADDING,
            baseline,
            detail,
            &style,
            Alignment::Right,
        );
    }
    canvas.advance(RISK_BANNER_HEIGHT + BANNER_GAP);
}

/// Draws wrapped text across the content width, breaking pages between lines.
pub fn paragraph(canvas: &mut Canvas, content: &str, style: &Style) {
    let left = canvas.left();
    let height = line_height(style);
    let content = text::sanitize(content);
    for line in text::wrap(&content, style, canvas.content_width()) {
        canvas.ensure_space(height);
        let baseline = canvas.y() + height * 0.8;
        canvas.page().text(left, baseline, &line, style);
        canvas.advance(height);
    }
    canvas.advance(BANNER_GAP / 2.0);
}

/// Draws a muted single-line placeholder such as "No events found".
pub fn placeholder(canvas: &mut Canvas, message: &str) {
    let style = Token::Placeholder.style();
    let height = line_height(&style) + 2.0;
    canvas.ensure_space(height);
    let baseline = canvas.y() + height * 0.7;
    let left = canvas.left();
    canvas.page().text(left + PANEL_PADDING, baseline, message, &style);
    canvas.advance(height + BANNER_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    #[test]
    fn missing_panel_values_render_as_dash() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        key_value_panel(
            &mut canvas,
            &[
                PanelRow::new("Claim #", Some("CLM-1")),
                PanelRow::new("Carrier", None::<String>),
                PanelRow::new("Adjuster", Some("   ")),
            ],
        );
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["Claim #", "CLM-1", "Carrier", "-", "Adjuster", "-"]);
    }

    #[test]
    fn banner_records_outline_mark() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        section_banner(&mut canvas, "Line Items");
        assert_eq!(canvas.outline().len(), 1);
        assert_eq!(canvas.outline()[0].title, "Line Items");
        assert!(canvas.contains_text("Line Items"));
    }

    #[test]
    fn banner_is_not_left_alone_at_page_bottom() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        let bottom = canvas.geometry().content_bottom();
        canvas.advance(bottom - canvas.y() - 10.0);
        section_banner(&mut canvas, "Justifications");
        assert_eq!(canvas.outline()[0].page, 1);
    }

    #[test]
    fn long_paragraph_spans_pages() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        let content = "Storm damage observed on all slopes. ".repeat(400);
        paragraph(&mut canvas, &content, &Token::Body.style());
        assert!(canvas.page_count() > 1);
    }

    #[test]
    fn risk_banner_uses_level_color() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        risk_banner(&mut canvas, Some(RiskLevel::Severe), Some("Index 8.4"));
        assert!(canvas.contains_text("SEVERE WEATHER RISK: SEVERE"));
        let fill = canvas.pages()[0].ops().iter().find_map(|op| match op {
            crate::canvas::DrawOp::Rect { fill, .. } => Some(*fill),
            _ => None,
        });
        assert_eq!(fill, Some(palette::RISK_SEVERE));
    }
}
