//! Report composers: one per report type, sharing a single render pipeline.
//!
//! Every composer lays its record out onto a fresh [`Canvas`]. [`render`] then runs the footer
//! pass over the finished page list and serializes the pages, so the per-report code only deals
//! with content order.

mod decoder;
mod supplement;
mod support;
mod weather;

use std::fmt;

use log::debug;

use crate::canvas::{Canvas, OutlineMark};
use crate::error::ReportError;
use crate::footer::{self, FooterSpec};
use crate::options::RenderOptions;
use crate::pdf;

/// The four report types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Line item supplement with financial summary and justifications.
    Supplement,
    /// Justification points per line item.
    Support,
    /// Storm verification for the date of loss.
    Weather,
    /// Unbranded summary of a decoded policy.
    Decoder,
}

impl ReportKind {
    /// All kinds, in the order they usually appear in a bundle.
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Supplement,
        ReportKind::Support,
        ReportKind::Weather,
        ReportKind::Decoder,
    ];

    /// Human readable report name, used as title and footer mark.
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Supplement => "Claim Supplement",
            ReportKind::Support => "Supplement Support Points",
            ReportKind::Weather => "Weather Verification",
            ReportKind::Decoder => "Policy Summary",
        }
    }

    /// Short identifier used in file names and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Supplement => "supplement",
            ReportKind::Support => "support",
            ReportKind::Weather => "weather",
            ReportKind::Decoder => "decoder",
        }
    }

    /// Looks a kind up by its [`slug`](Self::slug).
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Whether the brand mark is drawn. The decoder summary is always unbranded.
    pub fn branded(self) -> bool {
        !matches!(self, ReportKind::Decoder)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A finished PDF document.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportDocument {
    bytes: Vec<u8>,
    page_count: usize,
    kind: ReportKind,
    file_name: String,
    outline: Vec<OutlineMark>,
}

impl ReportDocument {
    /// Raw PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of pages laid out.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Report type.
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Suggested attachment file name, e.g. `supplement-CLM-1001.pdf`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Section titles with the page each one starts on.
    pub fn outline(&self) -> &[OutlineMark] {
        &self.outline
    }

    /// MIME type of the bytes.
    pub fn content_type(&self) -> &'static str {
        pdf::CONTENT_TYPE
    }

    /// Whether the bytes start with the PDF signature.
    pub fn has_pdf_signature(&self) -> bool {
        pdf::has_pdf_signature(&self.bytes)
    }

    /// Embeds the section outline as PDF bookmarks.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self) -> Result<Self, ReportError> {
        self.bytes = crate::bookmarks::apply_outline(&self.bytes, &self.outline)?;
        Ok(self)
    }
}

/// A record that can be laid out as one report.
pub trait ReportComposer {
    /// Report type of the record.
    fn kind(&self) -> ReportKind;

    /// Draws all content onto `canvas`. Footers are added afterwards by [`render`].
    fn compose(&self, canvas: &mut Canvas, options: &RenderOptions) -> Result<(), ReportError>;

    /// Identifier appended to the file name, usually the claim or policy number.
    fn reference(&self) -> Option<&str>;
}

/// Lays out `record` without serializing it, footers included.
pub fn layout<R>(record: &R, options: &RenderOptions) -> Result<Canvas, ReportError>
where
    R: ReportComposer + ?Sized,
{
    let kind = record.kind();
    let mut canvas = Canvas::new(options.geometry());
    record.compose(&mut canvas, options)?;

    let spec = FooterSpec {
        brand: brand_for(kind, options).map(str::to_owned),
        report_name: kind.name().to_owned(),
        generated_on: options.generated_on(),
    };
    footer::stamp_footers(&mut canvas, &spec);
    Ok(canvas)
}

/// Renders `record` into a finished PDF document.
pub fn render<R>(record: &R, options: &RenderOptions) -> Result<ReportDocument, ReportError>
where
    R: ReportComposer + ?Sized,
{
    let kind = record.kind();
    debug!("composing {} report", kind.slug());

    let canvas = layout(record, options)?;
    let title = options.title().unwrap_or_else(|| kind.name());
    let bytes = pdf::write_pdf(&canvas, title)?;

    let document = ReportDocument {
        page_count: canvas.page_count(),
        file_name: file_name(kind, record.reference()),
        outline: canvas.outline().to_vec(),
        kind,
        bytes,
    };
    debug!(
        "{} report done: {} page(s), {} bytes",
        kind.slug(),
        document.page_count,
        document.bytes.len()
    );
    Ok(document)
}

/// Brand drawn for `kind`, if any.
pub(crate) fn brand_for(kind: ReportKind, options: &RenderOptions) -> Option<&str> {
    if kind.branded() {
        options.brand()
    } else {
        None
    }
}

/// Builds `{slug}-{reference}.pdf`, keeping only file-name safe characters of the reference.
pub fn file_name(kind: ReportKind, reference: Option<&str>) -> String {
    let reference: String = reference
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if reference.is_empty() {
        format!("{}.pdf", kind.slug())
    } else {
        format!("{}-{}.pdf", kind.slug(), reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(
            file_name(ReportKind::Supplement, Some("CLM 10/01")),
            "supplement-CLM_10_01.pdf"
        );
        assert_eq!(file_name(ReportKind::Weather, Some("  ")), "weather.pdf");
        assert_eq!(file_name(ReportKind::Decoder, None), "decoder.pdf");
    }

    #[test]
    fn slugs_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ReportKind::from_slug("invoice"), None);
    }

    #[test]
    fn decoder_is_never_branded() {
        let options = RenderOptions::new().with_brand("Acme".to_owned());
        assert_eq!(brand_for(ReportKind::Decoder, &options), None);
        assert_eq!(brand_for(ReportKind::Weather, &options), Some("Acme"));
    }
}
