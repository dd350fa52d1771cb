//! PDF bookmarks for section banners, embedded with `lopdf` after rendering.

use std::collections::BTreeMap;
use std::fmt;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::canvas::OutlineMark;

/// Errors raised while embedding bookmarks into rendered bytes.
#[derive(Debug)]
pub enum BookmarkError {
    /// `lopdf` could not parse or write the document.
    Parse(lopdf::Error),
    /// The trailer has no `/Root` catalog reference.
    MissingCatalog,
    /// The catalog object is not a dictionary.
    InvalidCatalog,
    /// An outline mark points past the last page.
    MissingPage {
        /// Title of the section.
        title: String,
        /// Zero-based page index recorded for the section.
        page: usize,
    },
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to parse rendered PDF: {err}"),
            Self::MissingCatalog => write!(f, "PDF catalog entry is missing"),
            Self::InvalidCatalog => write!(f, "PDF catalog entry is not a dictionary"),
            Self::MissingPage { title, page } => write!(
                f,
                "Section {title:?} starts on page {} which does not exist",
                page + 1
            ),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingCatalog | Self::InvalidCatalog | Self::MissingPage { .. } => None,
        }
    }
}

struct Bookmark {
    id: ObjectId,
    page: ObjectId,
    title: String,
}

/// Adds a flat `/Outlines` tree with one `/Dest [page /Fit]` entry per mark.
///
/// Bytes are returned unchanged when there are no marks.
pub fn apply_outline(pdf_bytes: &[u8], marks: &[OutlineMark]) -> Result<Vec<u8>, BookmarkError> {
    if marks.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let bookmarks = resolve(&mut document, marks, &pages)?;

    let root = document.new_object_id();
    link(&mut document, root, &bookmarks);
    attach_root(&mut document, root, &bookmarks)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn resolve(
    document: &mut Document,
    marks: &[OutlineMark],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<Bookmark>, BookmarkError> {
    marks
        .iter()
        .map(|mark| {
            // lopdf numbers pages from 1.
            let number = u32::try_from(mark.page + 1).ok();
            let page = number
                .and_then(|number| pages.get(&number).copied())
                .ok_or_else(|| BookmarkError::MissingPage {
                    title: mark.title.clone(),
                    page: mark.page,
                })?;
            Ok(Bookmark {
                id: document.new_object_id(),
                page,
                title: mark.title.clone(),
            })
        })
        .collect()
}

fn link(document: &mut Document, root: ObjectId, bookmarks: &[Bookmark]) {
    for (index, bookmark) in bookmarks.iter().enumerate() {
        let mut entry = Dictionary::new();
        entry.set("Title", Object::string_literal(bookmark.title.as_str()));
        entry.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(bookmark.page),
                Object::Name("Fit".into()),
            ]),
        );
        entry.set("Parent", Object::Reference(root));
        if let Some(previous) = index.checked_sub(1).and_then(|i| bookmarks.get(i)) {
            entry.set("Prev", Object::Reference(previous.id));
        }
        if let Some(next) = bookmarks.get(index + 1) {
            entry.set("Next", Object::Reference(next.id));
        }
        document
            .objects
            .insert(bookmark.id, Object::Dictionary(entry));
    }
}

fn attach_root(
    document: &mut Document,
    root: ObjectId,
    bookmarks: &[Bookmark],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut outlines = Dictionary::new();
    outlines.set("Type", Object::Name("Outlines".into()));
    outlines.set("Count", Object::Integer(bookmarks.len() as i64));
    if let (Some(first), Some(last)) = (bookmarks.first(), bookmarks.last()) {
        outlines.set("First", Object::Reference(first.id));
        outlines.set("Last", Object::Reference(last.id));
    }
    document.objects.insert(root, Object::Dictionary(outlines));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(root));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::layout::PageGeometry;
    use crate::pdf;

    fn two_page_pdf() -> Vec<u8> {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        canvas.advance(10.0);
        canvas.page_break();
        pdf::write_pdf(&canvas, "Bookmarks").expect("write pdf")
    }

    fn mark(title: &str, page: usize) -> OutlineMark {
        OutlineMark {
            title: title.into(),
            page,
        }
    }

    #[test]
    fn outline_is_added_to_catalog() {
        let bytes = apply_outline(&two_page_pdf(), &[mark("Summary", 0), mark("Notes", 1)])
            .expect("apply outline");
        let document = Document::load_mem(&bytes).expect("reload");
        let catalog_id = document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .expect("root reference");
        let catalog = document.get_dictionary(catalog_id).expect("catalog");
        assert!(catalog.get(b"Outlines").is_ok());
    }

    #[test]
    fn mark_past_last_page_is_rejected() {
        let err = apply_outline(&two_page_pdf(), &[mark("Appendix", 5)]).unwrap_err();
        assert!(matches!(err, BookmarkError::MissingPage { page: 5, .. }));
    }
}
