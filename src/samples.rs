//! Representative records for demos, the command line `samples` command and tests.

use chrono::NaiveDate;

use crate::model::{
    ClaimSupplement, Coverage, LineItem, PolicyDecoder, RiskLevel, StormWindow, SupportReport,
    WeatherEvent, WeatherReport,
};
use crate::table;

const CLAIM_NUMBER: &str = "CLM-2026-0412";
const ADDRESS: &str = "1482 Larkspur Lane, Wichita, KS 67206";
const INSURED: &str = "Dana Whitfield";
const CARRIER: &str = "Prairie Mutual Insurance";

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Four items across two categories, each with a justification.
pub fn line_items() -> Vec<LineItem> {
    vec![
        LineItem::new("RFG DRIP", "Drip edge - aluminum", "Roofing")
            .with_pricing(212.0, "LF", 3.12, 661.44)
            .with_justification(
                "1. Drip edge is required at eaves and rakes 2. Existing drip edge was bent during \
                 tear-off and cannot be reused",
            )
            .with_code_reference(Some("IRC R905.2.8.5".to_owned())),
        LineItem::new("RFG IWS", "Ice & water barrier", "Roofing")
            .with_pricing(6.5, "SQ", 118.40, 769.60)
            .with_justification(
                "Ice barrier must extend 24 inches inside the exterior wall line. The original \
                 estimate omitted the eave courses.",
            )
            .with_code_reference(Some("IRC R905.1.2".to_owned())),
        LineItem::new("GTR AL6", "Gutter - aluminum 6\"", "Gutters")
            .with_pricing(148.0, "LF", 9.85, 1457.80)
            .with_justification(
                "\u{2022} Hail dents along the full south run \u{2022} Seams separated at two \
                 corners",
            ),
        LineItem::new("GTR DS", "Downspout - aluminum", "Gutters")
            .with_pricing(40.0, "LF", 8.90, 356.00)
            .with_justification("Downspouts must be detached to replace the gutters"),
    ]
}

/// `count` priced items spread over a few categories, grouped by category, for volume tests.
pub fn bulk_line_items(count: usize) -> Vec<LineItem> {
    const CATEGORIES: [&str; 3] = ["Roofing", "Gutters", "Interior"];
    let mut items: Vec<LineItem> = (0..count)
        .map(|index| {
            let total = 50.0 + index as f64 * 12.25;
            LineItem::new(
                format!("ITEM {index:03}"),
                format!("Line item number {index}"),
                CATEGORIES[index % CATEGORIES.len()],
            )
            .with_pricing(1.0, "EA", total, total)
            .with_justification(format!(
                "Item {index} was damaged by hail. Replacement matches the existing material."
            ))
        })
        .collect();
    table::sort_line_items(&mut items);
    items
}

/// A supplement with an adjuster total and [`line_items`].
pub fn supplement() -> ClaimSupplement {
    ClaimSupplement {
        claim_number: CLAIM_NUMBER.into(),
        policy_number: Some("PMI-HO3-558120".into()),
        insured_name: Some(INSURED.into()),
        property_address: Some(ADDRESS.into()),
        carrier: Some(CARRIER.into()),
        adjuster_name: Some("R. Okafor".into()),
        date_of_loss: date(2026, 4, 18),
        adjuster_total: Some(18_452.75),
        supplement_total: None,
        line_items: line_items(),
    }
}

/// The support-points record matching [`supplement`].
pub fn support() -> SupportReport {
    SupportReport {
        claim_number: CLAIM_NUMBER.into(),
        insured_name: Some(INSURED.into()),
        property_address: Some(ADDRESS.into()),
        carrier: Some(CARRIER.into()),
        line_items: line_items(),
    }
}

/// A weather verification with two qualifying events.
pub fn weather() -> WeatherReport {
    WeatherReport {
        claim_number: Some(CLAIM_NUMBER.into()),
        property_address: ADDRESS.into(),
        date_of_loss: date(2026, 4, 18),
        storm_window: date(2026, 4, 11).zip(date(2026, 4, 25)).map(|(start, end)| StormWindow {
            start,
            end,
        }),
        severe_risk: Some(RiskLevel::High),
        risk_index: Some(7.4),
        max_hail_inches: Some(1.75),
        max_wind_mph: Some(62.0),
        summary: Some(
            "Two severe reports were logged within three miles of the property during the storm \
             window, including hail large enough to damage asphalt shingles and aluminum gutters."
                .into(),
        ),
        events: vec![
            WeatherEvent {
                date: date(2026, 4, 18),
                kind: "Hail".into(),
                magnitude: Some("1.75 in".into()),
                distance_miles: Some(1.2),
                source: Some("NOAA SPC".into()),
            },
            WeatherEvent {
                date: date(2026, 4, 18),
                kind: "Thunderstorm Wind".into(),
                magnitude: Some("62 mph".into()),
                distance_miles: Some(2.8),
                source: Some("NWS ICT".into()),
            },
        ],
    }
}

/// A decoded HO-3 policy.
pub fn decoder() -> PolicyDecoder {
    PolicyDecoder {
        carrier: Some(CARRIER.into()),
        policy_number: Some("PMI-HO3-558120".into()),
        policy_type: Some("HO-3 Special Form".into()),
        named_insured: Some(INSURED.into()),
        property_address: Some(ADDRESS.into()),
        effective_date: date(2025, 9, 1),
        expiration_date: date(2026, 9, 1),
        deductible: Some("1% wind/hail, $1,000 all other perils".into()),
        coverages: vec![
            Coverage {
                name: "Coverage A - Dwelling".into(),
                limit: Some(342_000.0),
                deductible: Some("1%".into()),
                notes: Some("Replacement cost".into()),
            },
            Coverage {
                name: "Coverage B - Other Structures".into(),
                limit: Some(34_200.0),
                deductible: None,
                notes: None,
            },
            Coverage {
                name: "Coverage D - Loss of Use".into(),
                limit: Some(68_400.0),
                deductible: None,
                notes: Some("Up to 12 months".into()),
            },
        ],
        endorsements: vec![
            "Ordinance or Law - 10% of Coverage A".into(),
            "Roof surfacing payment schedule for roofs over 15 years".into(),
        ],
        exclusions: vec!["Cosmetic damage to metal roof coverings".into()],
        key_findings: vec![
            "Code upgrades are covered up to $34,200 under Ordinance or Law.".into(),
            "Wind/hail deductible is $3,420 based on the Coverage A limit.".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_span_two_categories() {
        let mut categories: Vec<_> = line_items().into_iter().map(|item| item.category).collect();
        categories.dedup();
        assert_eq!(categories, vec!["Roofing", "Gutters"]);
    }

    #[test]
    fn bulk_items_have_requested_length() {
        assert_eq!(bulk_line_items(20).len(), 20);
        assert!(bulk_line_items(0).is_empty());
    }

    #[test]
    fn bulk_items_are_grouped_by_category() {
        let items = bulk_line_items(10);
        assert!(table::CategoryGroups::from_sorted(&items).is_ok());
        let first: Vec<_> = items
            .iter()
            .filter(|item| item.category == "Roofing")
            .map(|item| item.code.as_str())
            .collect();
        assert_eq!(first, vec!["ITEM 000", "ITEM 003", "ITEM 006", "ITEM 009"]);
    }
}
