//! Input records for the four report types.
//!
//! Records are plain data assembled by the caller (typically from database rows). The layout
//! engine only ever borrows them; optional fields that are missing render as a placeholder dash
//! or drop the dependent row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One priced, justified entry of a claim supplement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Estimating code, e.g. `RFG DRIP`.
    pub code: String,
    /// Human readable description.
    pub description: String,
    /// Trade category used to group table rows.
    pub category: String,
    /// Quantity in `unit`s.
    pub quantity: f64,
    /// Unit of measure, e.g. `LF` or `SQ`.
    pub unit: String,
    /// Price per unit.
    pub unit_price: f64,
    /// Authoritative line total. Never recomputed from quantity and unit price.
    pub total_price: f64,
    /// Free-form narrative explaining why the item is owed.
    pub justification: String,
    /// Building code or manufacturer reference backing the item.
    pub code_reference: Option<String>,
}

impl LineItem {
    /// Creates an item with the identifying fields set and everything else empty.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Sets quantity, unit and prices and returns the updated item.
    pub fn with_pricing(
        mut self,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
        total_price: f64,
    ) -> Self {
        self.quantity = quantity;
        self.unit = unit.into();
        self.unit_price = unit_price;
        self.total_price = total_price;
        self
    }

    /// Sets the justification narrative and returns the updated item.
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }

    /// Sets the code reference and returns the updated item.
    pub fn with_code_reference(mut self, reference: impl Into<Option<String>>) -> Self {
        self.code_reference = reference.into();
        self
    }

    /// Whether the item carries a non-blank justification.
    pub fn has_justification(&self) -> bool {
        !self.justification.trim().is_empty()
    }
}

/// Sum of the authoritative totals of `items`.
pub fn items_total<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> f64 {
    items.into_iter().map(|item| item.total_price).sum()
}

/// Record behind the claim supplement report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimSupplement {
    /// Carrier claim number; also used in the suggested file name.
    pub claim_number: String,
    /// Policy number as printed on the declarations page.
    pub policy_number: Option<String>,
    /// Name of the policyholder.
    pub insured_name: Option<String>,
    /// Loss location.
    pub property_address: Option<String>,
    /// Insurance carrier name.
    pub carrier: Option<String>,
    /// Field or desk adjuster handling the claim.
    pub adjuster_name: Option<String>,
    /// Date the damage occurred.
    pub date_of_loss: Option<NaiveDate>,
    /// Total of the carrier's original estimate; drives the adjuster and revised total rows.
    pub adjuster_total: Option<f64>,
    /// Externally tracked supplement amount; the item sum is used when absent.
    pub supplement_total: Option<f64>,
    /// Items grouped by category, in the order they are drawn.
    pub line_items: Vec<LineItem>,
}

impl ClaimSupplement {
    /// Supplement amount shown in the financial summary.
    pub fn supplement_amount(&self) -> f64 {
        self.supplement_total
            .unwrap_or_else(|| items_total(&self.line_items))
    }
}

/// Record behind the justification ("support points") report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportReport {
    /// Carrier claim number; also used in the suggested file name.
    pub claim_number: String,
    /// Name of the policyholder.
    pub insured_name: Option<String>,
    /// Loss location.
    pub property_address: Option<String>,
    /// Insurance carrier name.
    pub carrier: Option<String>,
    /// Items in the order their points are drawn; items without justification are skipped.
    pub line_items: Vec<LineItem>,
}

/// Severity bucket of a weather verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    /// Label shown in the risk banner.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Severe => "SEVERE",
        }
    }
}

/// Date range searched for qualifying weather events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormWindow {
    /// First day searched.
    pub start: NaiveDate,
    /// Last day searched, inclusive.
    pub end: NaiveDate,
}

/// A recorded storm event near the property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherEvent {
    /// Day the event was reported.
    pub date: Option<NaiveDate>,
    /// Event type, e.g. `Hail` or `Thunderstorm Wind`.
    pub kind: String,
    /// Magnitude as reported, e.g. `1.75 in` or `65 mph`.
    pub magnitude: Option<String>,
    /// Distance from the property in miles.
    pub distance_miles: Option<f64>,
    /// Reporting source, e.g. `NOAA SPC`.
    pub source: Option<String>,
}

/// Record behind the weather verification report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    /// Claim the verification belongs to, when one exists yet.
    pub claim_number: Option<String>,
    /// Location the events were searched around.
    pub property_address: String,
    /// Date the damage occurred.
    pub date_of_loss: Option<NaiveDate>,
    /// Date range searched.
    pub storm_window: Option<StormWindow>,
    /// Severity bucket; colors the risk banner.
    pub severe_risk: Option<RiskLevel>,
    /// Opaque risk index supplied by the weather provider.
    pub risk_index: Option<f64>,
    /// Largest hail size in inches.
    pub max_hail_inches: Option<f64>,
    /// Strongest wind gust in mph.
    pub max_wind_mph: Option<f64>,
    /// Narrative drawn below the storm window panel.
    pub summary: Option<String>,
    /// Qualifying events in table order.
    pub events: Vec<WeatherEvent>,
}

/// One coverage line of a decoded policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coverage {
    /// Coverage name, e.g. `Coverage A - Dwelling`.
    pub name: String,
    /// Limit of liability in dollars.
    pub limit: Option<f64>,
    /// Deductible as written, e.g. `1%` or `$1,000`.
    pub deductible: Option<String>,
    /// Free text such as the valuation basis.
    pub notes: Option<String>,
}

/// Record behind the unbranded policy decoder summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDecoder {
    /// Insurance carrier name; drawn as the subtitle.
    pub carrier: Option<String>,
    /// Policy number; also used in the suggested file name.
    pub policy_number: Option<String>,
    /// Form, e.g. `HO-3 Special Form`.
    pub policy_type: Option<String>,
    /// Policyholder as named on the declarations page.
    pub named_insured: Option<String>,
    /// Insured location.
    pub property_address: Option<String>,
    /// Start of the policy period.
    pub effective_date: Option<NaiveDate>,
    /// End of the policy period.
    pub expiration_date: Option<NaiveDate>,
    /// Policy wide deductible as written.
    pub deductible: Option<String>,
    /// Coverage lines in table order.
    pub coverages: Vec<Coverage>,
    /// Endorsement descriptions.
    pub endorsements: Vec<String>,
    /// Exclusion descriptions.
    pub exclusions: Vec<String>,
    /// Analyst conclusions drawn as bullets.
    pub key_findings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplement_amount_prefers_tracked_total() {
        let mut record = ClaimSupplement {
            line_items: vec![
                LineItem::new("A", "a", "Roofing").with_pricing(1.0, "EA", 10.0, 10.0),
                LineItem::new("B", "b", "Roofing").with_pricing(1.0, "EA", 5.0, 5.5),
            ],
            ..ClaimSupplement::default()
        };
        assert!((record.supplement_amount() - 15.5).abs() < 1e-9);

        record.supplement_total = Some(20.0);
        assert!((record.supplement_amount() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn total_price_is_not_recomputed() {
        let item = LineItem::new("A", "a", "Roofing").with_pricing(3.0, "SQ", 100.0, 250.0);
        assert!((items_total([&item]) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn blank_justification_is_not_counted() {
        let item = LineItem::new("A", "a", "Roofing").with_justification("  \n ");
        assert!(!item.has_justification());
    }
}
