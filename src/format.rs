//! Value formatting shared by the composers.

use chrono::NaiveDate;

/// Placeholder drawn for missing values.
pub const PLACEHOLDER: &str = "-";

/// Formats a monetary amount as `$1,234.56`, with a leading minus for credits.
pub fn currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// Formats a quantity with up to two decimals and no trailing zeros.
pub fn quantity(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

/// Long date form used in headers and footers, e.g. `March 4, 2026`.
pub fn date(value: NaiveDate) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Short date form used in table cells, e.g. `03/04/2026`.
pub fn short_date(value: NaiveDate) -> String {
    value.format("%m/%d/%Y").to_string()
}

/// Formats an optional date, falling back to the placeholder.
pub fn optional_date(value: Option<NaiveDate>) -> String {
    value.map(date).unwrap_or_else(|| PLACEHOLDER.to_owned())
}

/// Returns the trimmed text, or `None` when it is blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(12.5), "$12.50");
        assert_eq!(currency(1234.567), "$1,234.57");
        assert_eq!(currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(currency(-45.1), "-$45.10");
    }

    #[test]
    fn quantity_drops_trailing_zeros() {
        assert_eq!(quantity(3.0), "3");
        assert_eq!(quantity(12.5), "12.5");
        assert_eq!(quantity(0.333), "0.33");
    }

    #[test]
    fn dates_use_long_and_short_forms() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 4).expect("valid date");
        assert_eq!(date(day), "March 4, 2026");
        assert_eq!(short_date(day), "03/04/2026");
        assert_eq!(optional_date(None), "-");
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  x ")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
