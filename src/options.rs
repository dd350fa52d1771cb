//! Render options shared by all report composers.

use std::env;

use chrono::{Local, NaiveDate};

use crate::layout::PageGeometry;

/// Environment variable consulted by [`RenderOptions::from_env`] for the brand mark.
pub const BRAND_ENV_VAR: &str = "CLAIM_REPORTS_BRAND";

/// Settings that are not part of a report record: branding, dates and the document title.
///
/// Built in the same fluent style as the record types:
///
/// ```
/// use chrono::NaiveDate;
/// use claim_reports::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_brand("Summit Roofing".to_owned())
///     .with_generated_on(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
/// assert_eq!(options.brand(), Some("Summit Roofing"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    brand: Option<String>,
    generated_on: NaiveDate,
    title: Option<String>,
    geometry: PageGeometry,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            brand: None,
            generated_on: Local::now().date_naive(),
            title: None,
            geometry: PageGeometry::LETTER,
        }
    }
}

impl RenderOptions {
    /// Creates options dated today without a brand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options whose brand comes from [`BRAND_ENV_VAR`] when it is set and not blank.
    pub fn from_env() -> Self {
        let brand = env::var(BRAND_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::new().with_brand(brand)
    }

    /// Sets the brand mark and returns the updated options.
    pub fn with_brand(mut self, brand: impl Into<Option<String>>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Sets the generation date printed in footers and returns the updated options.
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    /// Overrides the document title metadata and returns the updated options.
    pub fn with_title(mut self, title: impl Into<Option<String>>) -> Self {
        self.title = title.into();
        self
    }

    /// Brand mark, if any.
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Generation date.
    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    /// Title metadata override, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Page geometry used by every report.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }
}

impl From<&str> for RenderOptions {
    fn from(brand: &str) -> Self {
        Self::new().with_brand(brand.to_owned())
    }
}
