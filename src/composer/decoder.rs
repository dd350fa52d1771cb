use genpdf::Alignment;

use super::{ReportComposer, ReportKind};
use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::format::{self, PLACEHOLDER};
use crate::justification;
use crate::model::{Coverage, PolicyDecoder};
use crate::options::RenderOptions;
use crate::section::{self, PanelRow};
use crate::style::Token;
use crate::table::{self, ColumnSpec};

static COVERAGE_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::new("Coverage", 0.0, 70.0, Alignment::Left),
    ColumnSpec::new("Limit", 70.0, 32.0, Alignment::Right),
    ColumnSpec::new("Deductible", 102.0, 32.0, Alignment::Left),
    ColumnSpec::new("Notes", 134.0, 51.9, Alignment::Left),
];

const NO_COVERAGES: &str = "No coverages listed";

fn coverage_cells(coverage: &Coverage) -> Vec<String> {
    let text = |value: Option<&str>| format::non_blank(value).unwrap_or(PLACEHOLDER).to_owned();
    vec![
        coverage.name.clone(),
        coverage
            .limit
            .map(format::currency)
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        text(coverage.deductible.as_deref()),
        text(coverage.notes.as_deref()),
    ]
}

fn policy_period(record: &PolicyDecoder) -> Option<String> {
    match (record.effective_date, record.expiration_date) {
        (None, None) => None,
        (start, end) => Some(format!(
            "{} - {}",
            format::optional_date(start),
            format::optional_date(end)
        )),
    }
}

/// Banner plus bullet list, or a placeholder naming the empty list.
fn listing(canvas: &mut Canvas, title: &str, entries: &[String]) {
    section::section_banner(canvas, title);
    let entries: Vec<&str> = entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect();
    if entries.is_empty() {
        section::placeholder(canvas, &format!("No {} listed", title.to_lowercase()));
    } else {
        justification::bullet_list(canvas, &entries, &Token::Body.style());
        canvas.advance(4.0);
    }
}

impl ReportComposer for PolicyDecoder {
    fn kind(&self) -> ReportKind {
        ReportKind::Decoder
    }

    fn reference(&self) -> Option<&str> {
        self.policy_number.as_deref()
    }

    fn compose(&self, canvas: &mut Canvas, _options: &RenderOptions) -> Result<(), ReportError> {
        let kind = self.kind();
        section::report_header(
            canvas,
            None,
            kind.name(),
            format::non_blank(self.carrier.as_deref()),
        );

        section::section_banner(canvas, "Policy Overview");
        section::key_value_panel(
            canvas,
            &[
                PanelRow::new("Carrier", self.carrier.as_deref()),
                PanelRow::new("Policy Number", self.policy_number.as_deref()),
                PanelRow::new("Policy Type", self.policy_type.as_deref()),
                PanelRow::new("Named Insured", self.named_insured.as_deref()),
                PanelRow::new("Property Address", self.property_address.as_deref()),
                PanelRow::new("Policy Period", policy_period(self)),
                PanelRow::new("Deductible", self.deductible.as_deref()),
            ],
        );

        section::section_banner(canvas, "Coverages");
        let rows: Vec<Vec<String>> = self.coverages.iter().map(coverage_cells).collect();
        table::simple_table(canvas, &COVERAGE_COLUMNS, &rows, NO_COVERAGES);

        listing(canvas, "Endorsements", &self.endorsements);
        listing(canvas, "Exclusions", &self.exclusions);
        listing(canvas, "Key Findings", &self.key_findings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(record: &PolicyDecoder, options: &RenderOptions) -> Canvas {
        let mut canvas = Canvas::new(options.geometry());
        record.compose(&mut canvas, options).expect("compose");
        canvas
    }

    #[test]
    fn brand_is_never_drawn() {
        let options = RenderOptions::new().with_brand("Summit Roofing".to_owned());
        let canvas = compose(&PolicyDecoder::default(), &options);
        assert!(!canvas.texts().any(|text| text.contains("SUMMIT")));
        assert!(canvas.contains_text("Policy Summary"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let canvas = compose(&PolicyDecoder::default(), &RenderOptions::new());
        assert!(canvas.contains_text(NO_COVERAGES));
        assert!(canvas.contains_text("No endorsements listed"));
        assert!(canvas.contains_text("No exclusions listed"));
        assert!(canvas.contains_text("No key findings listed"));
    }

    #[test]
    fn coverage_limit_is_formatted_as_currency() {
        let cells = coverage_cells(&Coverage {
            name: "Coverage A - Dwelling".into(),
            limit: Some(350_000.0),
            deductible: Some("1%".into()),
            notes: None,
        });
        assert_eq!(cells, vec!["Coverage A - Dwelling", "$350,000.00", "1%", "-"]);
    }

    #[test]
    fn half_known_period_uses_placeholder() {
        let record = PolicyDecoder {
            effective_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1),
            ..PolicyDecoder::default()
        };
        assert_eq!(policy_period(&record).as_deref(), Some("January 1, 2026 - -"));
    }
}
