use genpdf::Alignment;
use log::warn;

use super::{brand_for, ReportComposer, ReportKind};
use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::format;
use crate::justification;
use crate::model::ClaimSupplement;
use crate::options::RenderOptions;
use crate::section::{self, AmountRow, PanelRow};
use crate::table::{self, CategoryGroups, ColumnSpec};

static COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::new("Code", 0.0, 22.0, Alignment::Left),
    ColumnSpec::new("Description", 22.0, 73.0, Alignment::Left),
    ColumnSpec::new("Qty", 95.0, 16.0, Alignment::Right),
    ColumnSpec::new("Unit", 111.0, 14.0, Alignment::Left),
    ColumnSpec::new("Unit Price", 125.0, 28.0, Alignment::Right),
    ColumnSpec::new("Total", 153.0, 32.9, Alignment::Right),
];

const ADJUSTER_ESTIMATE: &str = "Adjuster Estimate";
const SUPPLEMENT_AMOUNT: &str = "Supplement Amount";
const REVISED_TOTAL: &str = "Revised Total";

/// Financial summary rows. The adjuster and revised rows need the adjuster total.
fn financial_rows(record: &ClaimSupplement) -> Vec<AmountRow> {
    let supplement = record.supplement_amount();
    match record.adjuster_total {
        Some(adjuster) => vec![
            AmountRow::new(ADJUSTER_ESTIMATE, format::currency(adjuster)),
            AmountRow::new(SUPPLEMENT_AMOUNT, format::currency(supplement)),
            AmountRow::new(REVISED_TOTAL, format::currency(adjuster + supplement)).emphasized(),
        ],
        None => vec![AmountRow::new(SUPPLEMENT_AMOUNT, format::currency(supplement)).emphasized()],
    }
}

impl ReportComposer for ClaimSupplement {
    fn kind(&self) -> ReportKind {
        ReportKind::Supplement
    }

    fn reference(&self) -> Option<&str> {
        Some(self.claim_number.as_str())
    }

    fn compose(&self, canvas: &mut Canvas, options: &RenderOptions) -> Result<(), ReportError> {
        let kind = self.kind();
        let subtitle =
            format::non_blank(Some(self.claim_number.as_str())).map(|claim| format!("Claim # {claim}"));
        section::report_header(
            canvas,
            brand_for(kind, options),
            kind.name(),
            subtitle.as_deref(),
        );

        section::section_banner(canvas, "Claim Information");
        section::key_value_panel(
            canvas,
            &[
                PanelRow::new("Claim Number", Some(self.claim_number.as_str())),
                PanelRow::new("Policy Number", self.policy_number.as_deref()),
                PanelRow::new("Insured", self.insured_name.as_deref()),
                PanelRow::new("Property Address", self.property_address.as_deref()),
                PanelRow::new("Carrier", self.carrier.as_deref()),
                PanelRow::new("Adjuster", self.adjuster_name.as_deref()),
                PanelRow::new("Date of Loss", self.date_of_loss.map(format::date)),
            ],
        );

        section::section_banner(canvas, "Financial Summary");
        if self.adjuster_total.is_none() {
            warn!(
                "claim {}: no adjuster total, revised total omitted",
                self.claim_number
            );
        }
        section::amount_rows(canvas, &financial_rows(self));

        section::section_banner(canvas, "Line Items");
        let groups = CategoryGroups::from_sorted(&self.line_items)?;
        table::line_item_table(canvas, &COLUMNS, &groups);

        if groups.items().any(|item| item.has_justification()) {
            canvas.page_break();
            section::section_banner(canvas, "Justifications");
            justification::justification_list(canvas, groups.items());
        }
        Ok(())
    }
}
