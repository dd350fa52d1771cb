//! Collect-and-continue assembly of several generated documents and attachments.
//!
//! Packaging (zip writing, upload) happens elsewhere. This module only runs the generation jobs,
//! keeps what succeeded, records what failed and describes the result in a manifest.

use std::collections::HashSet;
use std::fmt::{self, Write as _};

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::composer::{self, ReportComposer, ReportDocument, ReportKind};
use crate::error::ReportError;
use crate::options::RenderOptions;
use crate::pdf;

/// Where an entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntrySource {
    /// A generated report.
    Report(ReportKind),
    /// A caller supplied file such as a photo or a previously stored document.
    Attachment,
}

/// One file of the bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleEntry {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Lowercase hex SHA-256 of `bytes`.
    pub sha256: String,
    pub source: EntrySource,
}

/// A generation job that did not produce a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleFailure {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for BundleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Result of a bundle run: everything that succeeded plus the recorded failures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: Vec<BundleEntry>,
    failures: Vec<BundleFailure>,
}

impl Bundle {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// Jobs that failed, in insertion order.
    pub fn failures(&self) -> &[BundleFailure] {
        &self.failures
    }

    /// Looks an entry up by its final (de-duplicated) name.
    pub fn entry(&self, name: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Whether nothing succeeded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain text listing of entries and failures.
    pub fn manifest(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} entr{}, {} failure{}",
            self.entries.len(),
            if self.entries.len() == 1 { "y" } else { "ies" },
            self.failures.len(),
            if self.failures.len() == 1 { "" } else { "s" },
        );
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "ok    {}  {}  {} bytes  sha256:{}",
                entry.name,
                entry.content_type,
                entry.bytes.len(),
                entry.sha256
            );
        }
        for failure in &self.failures {
            let _ = writeln!(out, "fail  {}  {}", failure.name, failure.reason);
        }
        out
    }
}

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Returns `name`, or `name` with a `-2`, `-3`, ... suffix before its extension when taken.
fn unique_name(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_owned();
    }
    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    (2..)
        .map(|suffix| format!("{stem}-{suffix}{extension}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_owned())
}

/// Runs generation jobs one after another and keeps going when one fails.
#[derive(Debug, Default)]
pub struct BundleBuilder {
    bundle: Bundle,
    used: HashSet<String>,
}

impl BundleBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, content_type: &str, bytes: Vec<u8>, source: EntrySource) {
        let name = unique_name(name, &self.used);
        self.used.insert(name.clone());
        debug!("bundle entry {name}: {} bytes", bytes.len());
        self.bundle.entries.push(BundleEntry {
            sha256: sha256_hex(&bytes),
            name,
            content_type: content_type.to_owned(),
            bytes,
            source,
        });
    }

    /// Runs `job` and adds its document under `name`.
    ///
    /// A failing job is logged and recorded as a [`BundleFailure`]; the other entries are not
    /// affected. Returns whether the document was added.
    pub fn add_document<F>(&mut self, name: impl Into<String>, job: F) -> bool
    where
        F: FnOnce() -> Result<ReportDocument, ReportError>,
    {
        let name = name.into();
        match job() {
            Ok(document) => {
                let kind = document.kind();
                self.push(
                    &name,
                    pdf::CONTENT_TYPE,
                    document.into_bytes(),
                    EntrySource::Report(kind),
                );
                true
            }
            Err(err) => {
                warn!("skipping bundle entry {name}: {err}");
                self.bundle.failures.push(BundleFailure {
                    name,
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    /// Renders `record` and adds it under its suggested file name.
    pub fn add_report<R>(&mut self, record: &R, options: &RenderOptions) -> bool
    where
        R: ReportComposer + ?Sized,
    {
        let name = composer::file_name(record.kind(), record.reference());
        self.add_document(name, || composer::render(record, options))
    }

    /// Adds a caller supplied file as is.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> &mut Self {
        let name = name.into();
        let content_type = content_type.into();
        self.push(&name, &content_type, bytes, EntrySource::Attachment);
        self
    }

    /// Finishes the run.
    pub fn build(self) -> Bundle {
        debug!(
            "bundle finished: {} entries, {} failures",
            self.bundle.entries.len(),
            self.bundle.failures.len()
        );
        self.bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_get_numeric_suffix() {
        let mut builder = BundleBuilder::new();
        builder
            .add_attachment("photo.jpg", "image/jpeg", vec![1])
            .add_attachment("photo.jpg", "image/jpeg", vec![2])
            .add_attachment("photo.jpg", "image/jpeg", vec![3])
            .add_attachment("README", "text/plain", vec![4])
            .add_attachment("README", "text/plain", vec![5]);
        let bundle = builder.build();
        let names: Vec<_> = bundle.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["photo.jpg", "photo-2.jpg", "photo-3.jpg", "README", "README-2"]
        );
    }

    #[test]
    fn failed_job_is_recorded_and_skipped() {
        let mut builder = BundleBuilder::new();
        let added = builder.add_document("weather.pdf", || {
            Err(ReportError::UnsortedCategories {
                index: 3,
                category: "Roofing".into(),
            })
        });
        assert!(!added);
        builder.add_attachment("notes.txt", "text/plain", b"hello".to_vec());

        let bundle = builder.build();
        assert_eq!(bundle.entries().len(), 1);
        assert_eq!(bundle.failures().len(), 1);
        assert_eq!(bundle.failures()[0].name, "weather.pdf");
        assert!(bundle.manifest().contains("fail  weather.pdf"));
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn manifest_lists_entries_with_digests() {
        let mut builder = BundleBuilder::new();
        builder.add_attachment("notes.txt", "text/plain", b"abc".to_vec());
        let manifest = builder.build().manifest();
        assert!(manifest.starts_with("1 entry, 0 failures"));
        assert!(manifest.contains("ok    notes.txt  text/plain  3 bytes  sha256:ba7816bf"));
    }
}
