//! Page geometry and the vertical layout cursor.

use log::trace;

/// Fixed page geometry in millimetres, measured from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Distance from the top edge to the first line of content.
    pub top_margin: f64,
    /// Space reserved at the bottom of every page, including the footer.
    pub bottom_margin: f64,
    /// Left margin.
    pub left_margin: f64,
    /// Right margin.
    pub right_margin: f64,
}

impl PageGeometry {
    /// US Letter with the margins shared by every report.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 215.9,
        height: 279.4,
        top_margin: 16.0,
        bottom_margin: 22.0,
        left_margin: 15.0,
        right_margin: 15.0,
    };

    /// Horizontal space available for content.
    pub fn content_width(&self) -> f64 {
        self.width - self.left_margin - self.right_margin
    }

    /// X coordinate of the right content edge.
    pub fn content_right(&self) -> f64 {
        self.width - self.right_margin
    }

    /// Lowest Y coordinate content may reach.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.bottom_margin
    }

    /// Vertical space available for content on a fresh page.
    pub fn content_height(&self) -> f64 {
        self.content_bottom() - self.top_margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Tracks the current page and vertical offset while a report is laid out.
///
/// The cursor never moves below [`PageGeometry::content_bottom`]. Content that would cross it
/// goes through [`LayoutCursor::ensure_space`], which starts a new page and resets the offset to
/// the top margin first.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    page: usize,
    y: f64,
}

impl LayoutCursor {
    /// Creates a cursor at the top of the first page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page: 0,
            y: geometry.top_margin,
        }
    }

    /// Geometry the cursor was created with.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current vertical offset from the top edge.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Space left on the current page.
    pub fn remaining(&self) -> f64 {
        self.geometry.content_bottom() - self.y
    }

    /// Whether nothing has been placed on the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.y <= self.geometry.top_margin
    }

    /// Makes sure `needed` millimetres fit below the cursor, breaking the page otherwise.
    ///
    /// Returns `true` when a page break was inserted. Content taller than a whole page is placed
    /// at the top of a fresh page rather than breaking again.
    pub fn ensure_space(&mut self, needed: f64) -> bool {
        if self.y + needed <= self.geometry.content_bottom() || self.at_page_top() {
            return false;
        }
        self.page_break();
        true
    }

    /// Starts a new page and moves the cursor to its top margin.
    pub fn page_break(&mut self) {
        self.page += 1;
        self.y = self.geometry.top_margin;
        trace!("page break, now on page {}", self.page + 1);
    }

    /// Moves the cursor down by `dy`, stopping at the bottom of the content area.
    ///
    /// Spacing that does not fit collapses at the page boundary; the next
    /// [`ensure_space`](Self::ensure_space) call starts the new page.
    pub fn advance(&mut self, dy: f64) {
        self.y = (self.y + dy).min(self.geometry.content_bottom());
    }
}
