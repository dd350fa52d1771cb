//! Error type shared by the report composers.

use std::fmt;

/// Errors that abort the generation of a single report.
///
/// Missing optional data never ends up here: it degrades to a placeholder while the report is
/// laid out. Only failures of the PDF surface itself and violated layout preconditions are
/// reported to the caller.
#[derive(Debug)]
pub enum ReportError {
    /// The PDF surface failed while fonts were installed or the document was serialized.
    Render(genpdf::error::Error),
    /// Line items handed to the table renderer were not grouped by category.
    UnsortedCategories {
        /// Position of the first item that reopened an earlier category.
        index: usize,
        /// The category that appeared more than once.
        category: String,
    },
    /// Section bookmarks could not be embedded into the rendered bytes.
    #[cfg(feature = "bookmarks")]
    Bookmarks(crate::bookmarks::BookmarkError),
}

impl From<genpdf::error::Error> for ReportError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Render(err)
    }
}

#[cfg(feature = "bookmarks")]
impl From<crate::bookmarks::BookmarkError> for ReportError {
    fn from(err: crate::bookmarks::BookmarkError) -> Self {
        Self::Bookmarks(err)
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(err) => write!(f, "Failed to render report: {err}"),
            Self::UnsortedCategories { index, category } => write!(
                f,
                "Line item {} reopens category '{}'; items must be sorted by category",
                index, category
            ),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => write!(f, "Failed to embed section bookmarks: {err}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::UnsortedCategories { .. } => None,
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportError;

    #[test]
    fn unsorted_categories_message_names_the_category() {
        let err = ReportError::UnsortedCategories {
            index: 3,
            category: "Roofing".into(),
        };
        let message = err.to_string();
        assert!(message.contains("Line item 3"));
        assert!(message.contains("'Roofing'"));
    }
}
