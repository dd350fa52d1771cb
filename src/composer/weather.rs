use genpdf::Alignment;
use log::warn;

use super::{brand_for, ReportComposer, ReportKind};
use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::format::{self, PLACEHOLDER};
use crate::model::{WeatherEvent, WeatherReport};
use crate::options::RenderOptions;
use crate::section::{self, PanelRow};
use crate::style::Token;
use crate::table::{self, ColumnSpec};

static EVENT_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::new("Date", 0.0, 28.0, Alignment::Left),
    ColumnSpec::new("Event", 28.0, 52.0, Alignment::Left),
    ColumnSpec::new("Magnitude", 80.0, 30.0, Alignment::Left),
    ColumnSpec::new("Distance", 110.0, 26.0, Alignment::Right),
    ColumnSpec::new("Source", 136.0, 49.9, Alignment::Left),
];

/// Shown instead of the events table when no event qualified.
pub const NO_EVENTS: &str = "No qualifying weather events found";

fn event_cells(event: &WeatherEvent) -> Vec<String> {
    vec![
        event
            .date
            .map(format::short_date)
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        event.kind.clone(),
        format::non_blank(event.magnitude.as_deref())
            .unwrap_or(PLACEHOLDER)
            .to_owned(),
        event
            .distance_miles
            .map(|miles| format!("{miles:.1} mi"))
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        format::non_blank(event.source.as_deref())
            .unwrap_or(PLACEHOLDER)
            .to_owned(),
    ]
}

fn storm_window(record: &WeatherReport) -> Option<String> {
    record.storm_window.map(|window| {
        format!(
            "{} - {}",
            format::date(window.start),
            format::date(window.end)
        )
    })
}

impl ReportComposer for WeatherReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Weather
    }

    fn reference(&self) -> Option<&str> {
        self.claim_number.as_deref()
    }

    fn compose(&self, canvas: &mut Canvas, options: &RenderOptions) -> Result<(), ReportError> {
        let kind = self.kind();
        section::report_header(
            canvas,
            brand_for(kind, options),
            kind.name(),
            format::non_blank(Some(self.property_address.as_str())),
        );

        section::section_banner(canvas, "Property");
        section::key_value_panel(
            canvas,
            &[
                PanelRow::new("Property Address", Some(self.property_address.as_str())),
                PanelRow::new("Claim Number", self.claim_number.as_deref()),
                PanelRow::new("Date of Loss", self.date_of_loss.map(format::date)),
            ],
        );

        if self.severe_risk.is_none() {
            warn!(
                "weather report for {:?}: no severe risk level, banner not rated",
                self.property_address
            );
        }
        let index = self.risk_index.map(|index| format!("Risk Index {index:.1}"));
        section::risk_banner(canvas, self.severe_risk, index.as_deref());

        section::section_banner(canvas, "Storm Window");
        section::key_value_panel(
            canvas,
            &[
                PanelRow::new("Window", storm_window(self)),
                PanelRow::new(
                    "Max Hail Size",
                    self.max_hail_inches.map(|hail| format!("{hail:.2} in")),
                ),
                PanelRow::new(
                    "Max Wind Speed",
                    self.max_wind_mph.map(|wind| format!("{wind:.0} mph")),
                ),
                PanelRow::new("Events Found", Some(self.events.len().to_string())),
            ],
        );
        if let Some(summary) = format::non_blank(self.summary.as_deref()) {
            section::paragraph(canvas, summary, &Token::Body.style());
        }

        section::section_banner(canvas, "Weather Events");
        let rows: Vec<Vec<String>> = self.events.iter().map(event_cells).collect();
        table::simple_table(canvas, &EVENT_COLUMNS, &rows, NO_EVENTS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{RiskLevel, StormWindow};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).expect("valid date")
    }

    fn compose(record: &WeatherReport) -> Canvas {
        let options = RenderOptions::new();
        let mut canvas = Canvas::new(options.geometry());
        record.compose(&mut canvas, &options).expect("compose");
        canvas
    }

    #[test]
    fn no_events_renders_placeholder() {
        let canvas = compose(&WeatherReport {
            property_address: "12 Elm St".into(),
            ..WeatherReport::default()
        });
        assert!(canvas.contains_text(NO_EVENTS));
        assert!(canvas.contains_text("SEVERE WEATHER RISK: NOT RATED"));
    }

    #[test]
    fn events_are_listed_in_record_order() {
        let record = WeatherReport {
            property_address: "12 Elm St".into(),
            severe_risk: Some(RiskLevel::High),
            storm_window: Some(StormWindow {
                start: date(1),
                end: date(9),
            }),
            events: vec![
                WeatherEvent {
                    date: Some(date(4)),
                    kind: "Hail".into(),
                    magnitude: Some("1.75 in".into()),
                    distance_miles: Some(2.34),
                    source: Some("NOAA SPC".into()),
                },
                WeatherEvent {
                    kind: "Thunderstorm Wind".into(),
                    ..WeatherEvent::default()
                },
            ],
            ..WeatherReport::default()
        };
        let canvas = compose(&record);
        assert!(canvas.contains_text("May 1, 2026 - May 9, 2026"));
        assert!(canvas.contains_text("2.3 mi"));
        let texts: Vec<_> = canvas.texts().collect();
        let hail = texts.iter().position(|text| *text == "Hail");
        let wind = texts.iter().position(|text| *text == "Thunderstorm Wind");
        assert!(hail.is_some() && hail < wind);
        assert!(!canvas.contains_text(NO_EVENTS));
    }

    #[test]
    fn missing_event_fields_render_as_dash() {
        let cells = event_cells(&WeatherEvent {
            kind: "Hail".into(),
            ..WeatherEvent::default()
        });
        assert_eq!(cells, vec!["-", "Hail", "-", "-", "-"]);
    }
}
