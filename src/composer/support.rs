use super::{brand_for, ReportComposer, ReportKind};
use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::format;
use crate::justification;
use crate::model::SupportReport;
use crate::options::RenderOptions;
use crate::section::{self, PanelRow};

impl ReportComposer for SupportReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Support
    }

    fn reference(&self) -> Option<&str> {
        Some(self.claim_number.as_str())
    }

    fn compose(&self, canvas: &mut Canvas, options: &RenderOptions) -> Result<(), ReportError> {
        let kind = self.kind();
        let subtitle = format::non_blank(Some(self.claim_number.as_str()))
            .map(|claim| format!("Claim # {claim}"));
        section::report_header(
            canvas,
            brand_for(kind, options),
            kind.name(),
            subtitle.as_deref(),
        );

        let justified = self
            .line_items
            .iter()
            .filter(|item| item.has_justification())
            .count();
        section::section_banner(canvas, "Claim Information");
        section::key_value_panel(
            canvas,
            &[
                PanelRow::new("Claim Number", Some(self.claim_number.as_str())),
                PanelRow::new("Insured", self.insured_name.as_deref()),
                PanelRow::new("Property Address", self.property_address.as_deref()),
                PanelRow::new("Carrier", self.carrier.as_deref()),
                PanelRow::new(
                    "Items Supported",
                    Some(format!("{} of {}", justified, self.line_items.len())),
                ),
            ],
        );

        section::section_banner(canvas, "Support Points");
        justification::justification_list(canvas, &self.line_items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justification::NO_JUSTIFICATIONS;
    use crate::model::LineItem;

    fn compose(record: &SupportReport) -> Canvas {
        let options = RenderOptions::new();
        let mut canvas = Canvas::new(options.geometry());
        record.compose(&mut canvas, &options).expect("compose");
        canvas
    }

    #[test]
    fn items_without_justification_are_skipped() {
        let record = SupportReport {
            claim_number: "CLM-7".into(),
            line_items: vec![
                LineItem::new("RFG STRT", "Starter strip", "Roofing")
                    .with_justification("Starter is required at eaves and rakes."),
                LineItem::new("RFG VENT", "Ridge vent", "Roofing"),
            ],
            ..SupportReport::default()
        };
        let canvas = compose(&record);
        assert!(canvas.contains_text("RFG STRT - Starter strip"));
        assert!(!canvas.contains_text("RFG VENT - Ridge vent"));
        assert!(canvas.contains_text("1 of 2"));
    }

    #[test]
    fn empty_report_shows_placeholder() {
        let canvas = compose(&SupportReport::default());
        assert!(canvas.contains_text(NO_JUSTIFICATIONS));
        assert_eq!(canvas.page_count(), 1);
    }
}
