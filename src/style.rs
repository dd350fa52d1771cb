//! Named colors and text styles shared by every report.
//!
//! Renderers never construct colors or font selections inline; they ask the registry for a
//! [`Token`] and receive a `genpdf` [`Style`] carrying weight, size and color. Keeping the
//! palette in one place is what keeps the four report types visually consistent.

use genpdf::style::{Color, Style};

use crate::model::RiskLevel;

/// Millimetres per PDF point.
pub const PT_TO_MM: f64 = 0.352_778;

/// Line height as a multiple of the font size.
pub const LINE_SPACING: f64 = 1.3;

/// Raw palette entries.
pub mod palette {
    use genpdf::style::Color;

    /// Body text.
    pub const INK: Color = Color::Rgb(33, 37, 41);
    /// Secondary text such as labels and placeholders.
    pub const MUTED: Color = Color::Rgb(108, 117, 125);
    /// Brand accent used for banners and rules.
    pub const ACCENT: Color = Color::Rgb(21, 67, 140);
    /// Light tint of the accent used behind panels.
    pub const ACCENT_TINT: Color = Color::Rgb(232, 239, 250);
    /// Table header background.
    pub const HEADER_FILL: Color = Color::Rgb(30, 52, 92);
    /// Text drawn on dark fills.
    pub const ON_DARK: Color = Color::Rgb(255, 255, 255);
    /// Alternating row shade.
    pub const ROW_SHADE: Color = Color::Rgb(245, 247, 250);
    /// Category banner rows.
    pub const CATEGORY_FILL: Color = Color::Rgb(222, 230, 242);
    /// Thin separators.
    pub const RULE: Color = Color::Rgb(200, 206, 214);
    /// Code reference lines beneath justification points.
    pub const CODE_REFERENCE: Color = Color::Rgb(0, 112, 99);
    /// Low risk.
    pub const RISK_LOW: Color = Color::Rgb(46, 125, 50);
    /// Moderate risk.
    pub const RISK_MODERATE: Color = Color::Rgb(230, 145, 0);
    /// High risk.
    pub const RISK_HIGH: Color = Color::Rgb(211, 84, 0);
    /// Severe risk.
    pub const RISK_SEVERE: Color = Color::Rgb(183, 28, 28);
    /// Unknown risk.
    pub const RISK_UNKNOWN: Color = Color::Rgb(120, 130, 140);
}

/// Named text roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Brand mark above the report title.
    Brand,
    /// Report title.
    Title,
    /// Line under the title.
    Subtitle,
    /// Section banner heading.
    Heading,
    /// Wrapped paragraphs and bullet points.
    Body,
    /// Emphasised body text, e.g. justification item headings.
    BodyStrong,
    /// Labels in key-value panels.
    Label,
    /// Values in key-value panels.
    Value,
    /// Table header cells.
    TableHeader,
    /// Table body cells.
    TableCell,
    /// Category banner rows.
    Category,
    /// Table total rows and revised totals.
    Total,
    /// Code reference line beneath justification points.
    CodeReference,
    /// Footer text.
    Footer,
    /// "None found" placeholders.
    Placeholder,
    /// Text inside the filled risk banner.
    Banner,
}

impl Token {
    /// Resolves the token into a `genpdf` style.
    pub fn style(self) -> Style {
        match self {
            Token::Brand => Style::new()
                .bold()
                .with_font_size(9)
                .with_color(palette::ACCENT),
            Token::Title => Style::new()
                .bold()
                .with_font_size(18)
                .with_color(palette::INK),
            Token::Subtitle => Style::new().with_font_size(10).with_color(palette::MUTED),
            Token::Heading => Style::new()
                .bold()
                .with_font_size(12)
                .with_color(palette::ACCENT),
            Token::Body => Style::new().with_font_size(9).with_color(palette::INK),
            Token::BodyStrong => Style::new()
                .bold()
                .with_font_size(9)
                .with_color(palette::INK),
            Token::Label => Style::new()
                .bold()
                .with_font_size(9)
                .with_color(palette::MUTED),
            Token::Value => Style::new().with_font_size(9).with_color(palette::INK),
            Token::TableHeader => Style::new()
                .bold()
                .with_font_size(8)
                .with_color(palette::ON_DARK),
            Token::TableCell => Style::new().with_font_size(8).with_color(palette::INK),
            Token::Category => Style::new()
                .bold()
                .with_font_size(8)
                .with_color(palette::HEADER_FILL),
            Token::Total => Style::new()
                .bold()
                .with_font_size(9)
                .with_color(palette::INK),
            Token::CodeReference => Style::new()
                .with_font_size(8)
                .with_color(palette::CODE_REFERENCE),
            Token::Footer => Style::new().with_font_size(7).with_color(palette::MUTED),
            Token::Placeholder => Style::new().with_font_size(9).with_color(palette::MUTED),
            Token::Banner => Style::new()
                .bold()
                .with_font_size(11)
                .with_color(palette::ON_DARK),
        }
    }
}

/// Font size of `style` in millimetres.
pub fn font_size_mm(style: &Style) -> f64 {
    f64::from(style.font_size()) * PT_TO_MM
}

/// Distance between two consecutive baselines for `style`, in millimetres.
pub fn line_height(style: &Style) -> f64 {
    font_size_mm(style) * LINE_SPACING
}

/// Color of the text in `style`, falling back to body ink.
pub fn text_color(style: &Style) -> Color {
    style.color().unwrap_or(palette::INK)
}

/// Banner color for a weather risk level.
pub fn risk_color(level: Option<RiskLevel>) -> Color {
    match level {
        Some(RiskLevel::Low) => palette::RISK_LOW,
        Some(RiskLevel::Moderate) => palette::RISK_MODERATE,
        Some(RiskLevel::High) => palette::RISK_HIGH,
        Some(RiskLevel::Severe) => palette::RISK_SEVERE,
        None => palette::RISK_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_header_is_bold_on_dark_fill() {
        let style = Token::TableHeader.style();
        assert!(style.is_bold());
        assert_eq!(style.color(), Some(palette::ON_DARK));
    }

    #[test]
    fn code_reference_uses_accent_color() {
        let style = Token::CodeReference.style();
        assert!(!style.is_bold());
        assert_eq!(style.color(), Some(palette::CODE_REFERENCE));
    }

    #[test]
    fn risk_levels_map_to_distinct_colors() {
        let colors = [
            risk_color(Some(RiskLevel::Low)),
            risk_color(Some(RiskLevel::Moderate)),
            risk_color(Some(RiskLevel::High)),
            risk_color(Some(RiskLevel::Severe)),
            risk_color(None),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn line_height_grows_with_font_size() {
        assert!(line_height(&Token::Title.style()) > line_height(&Token::Body.style()));
    }
}
