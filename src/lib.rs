//! Core entry point for the claim_reports crate.
//!
//! The crate lays out claim supplements, justification reports, weather verifications and
//! policy summaries as paginated PDF documents. Content is first recorded on a [`canvas::Canvas`]
//! one page at a time; footers are stamped once the page count is known and the recorded pages
//! are finally written through `printpdf`.

pub mod bundle;
pub mod canvas;
pub mod composer;
pub mod error;
pub mod fonts;
pub mod footer;
pub mod format;
pub mod justification;
pub mod layout;
pub mod model;
pub mod options;
pub mod pdf;
pub mod samples;
pub mod section;
pub mod style;
pub mod table;
pub mod text;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use composer::{render, ReportComposer, ReportDocument, ReportKind};
pub use error::ReportError;
pub use options::RenderOptions;
