//! Footer pass, run once all content has been laid out.
//!
//! "Page N of M" needs the final page count, so footers are stamped onto the recorded pages in a
//! second pass instead of while the content is drawn.

use chrono::NaiveDate;
use genpdf::Alignment;

use crate::canvas::Canvas;
use crate::format;
use crate::style::{palette, Token};

const DIVIDER_OFFSET: f64 = 6.0;
const TEXT_OFFSET: f64 = 10.5;

/// Content of the footer drawn on every page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterSpec {
    /// Brand mark; `None` for unbranded reports.
    pub brand: Option<String>,
    /// Name of the report, e.g. "Claim Supplement".
    pub report_name: String,
    /// Date printed as the generation date.
    pub generated_on: NaiveDate,
}

impl FooterSpec {
    /// Text drawn at the left edge.
    pub fn mark(&self) -> String {
        match self.brand.as_deref().map(str::trim) {
            Some(brand) if !brand.is_empty() => format!("{brand} | {}", self.report_name),
            _ => self.report_name.clone(),
        }
    }
}

/// Page label in the form `Page 2 of 5`.
pub fn page_label(index: usize, count: usize) -> String {
    format!("Page {} of {}", index + 1, count)
}

/// Stamps the footer onto every page of `canvas` and returns the number of pages stamped.
pub fn stamp_footers(canvas: &mut Canvas, spec: &FooterSpec) -> usize {
    let geometry = canvas.geometry();
    let style = Token::Footer.style();
    let left = geometry.left_margin;
    let width = geometry.content_width();
    let divider_y = geometry.content_bottom() + DIVIDER_OFFSET;
    let baseline = geometry.content_bottom() + TEXT_OFFSET;
    let mark = spec.mark();
    let generated = format!("Generated {}", format::date(spec.generated_on));

    let count = canvas.page_count();
    for page in canvas.pages_mut() {
        page.line(
            (left, divider_y),
            (left + width, divider_y),
            palette::RULE,
            0.5,
        );
        page.text(left, baseline, &mark, &style);
        page.text_aligned(left, width, baseline, &generated, &style, Alignment::Center);
        let label = page_label(page.index(), count);
        page.text_aligned(left, width, baseline, &label, &style, Alignment::Right);
    }
    count
}
