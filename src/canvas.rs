//! Recording drawing surface.
//!
//! Renderers draw onto a [`Canvas`], which keeps one [`RenderedPage`] per page the
//! [`LayoutCursor`] has reached. Pages stay enumerable after the content pass so that footers can
//! be stamped once the final page count is known, and so that tests can inspect what was drawn
//! without parsing PDF bytes.

use genpdf::style::{Color, Style};
use genpdf::Alignment;

use crate::layout::{LayoutCursor, PageGeometry};
use crate::style::text_color;
use crate::text;

/// Text attributes captured at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Whether the bold face is used.
    pub bold: bool,
    /// Font size in points.
    pub size: u8,
    /// Fill color of the glyphs.
    pub color: Color,
}

impl From<&Style> for TextStyle {
    fn from(style: &Style) -> Self {
        Self {
            bold: style.is_bold(),
            size: style.font_size(),
            color: text_color(style),
        }
    }
}

/// A single drawing instruction. Coordinates are millimetres from the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A run of text starting at `x` on the given baseline.
    Text {
        x: f64,
        baseline: f64,
        text: String,
        style: TextStyle,
    },
    /// A straight stroke.
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        /// Stroke width in points.
        thickness: f64,
    },
    /// A filled rectangle without outline.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
}

/// Drawing instructions belonging to one page.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    index: usize,
    ops: Vec<DrawOp>,
}

impl RenderedPage {
    fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Instructions in drawing order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Draws `content` with its left edge at `x`.
    pub fn text(&mut self, x: f64, baseline: f64, content: &str, style: &Style) {
        let content = text::sanitize(content);
        if content.trim().is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            baseline,
            text: content.into_owned(),
            style: TextStyle::from(style),
        });
    }

    /// Draws `content` aligned inside the box `[x, x + width]`.
    pub fn text_aligned(
        &mut self,
        x: f64,
        width: f64,
        baseline: f64,
        content: &str,
        style: &Style,
        alignment: Alignment,
    ) {
        let content = text::sanitize(content);
        let start = text::aligned_x(x, width, &content, style, alignment);
        self.text(start, baseline, &content, style);
    }

    /// Draws a straight line.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, thickness: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }
}

/// Section title together with the page it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineMark {
    /// Section title as drawn in its banner.
    pub title: String,
    /// Zero-based page index.
    pub page: usize,
}

/// A document being laid out: the cursor plus every page it has visited.
#[derive(Clone, Debug)]
pub struct Canvas {
    cursor: LayoutCursor,
    pages: Vec<RenderedPage>,
    outline: Vec<OutlineMark>,
}

impl Canvas {
    /// Creates a canvas holding one empty page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            cursor: LayoutCursor::new(geometry),
            pages: vec![RenderedPage::new(0)],
            outline: Vec::new(),
        }
    }

    /// The layout cursor.
    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    /// Page geometry.
    pub fn geometry(&self) -> PageGeometry {
        *self.cursor.geometry()
    }

    /// Current vertical offset.
    pub fn y(&self) -> f64 {
        self.cursor.y()
    }

    /// Left content edge.
    pub fn left(&self) -> f64 {
        self.cursor.geometry().left_margin
    }

    /// Width of the content area.
    pub fn content_width(&self) -> f64 {
        self.cursor.geometry().content_width()
    }

    /// See [`LayoutCursor::ensure_space`].
    pub fn ensure_space(&mut self, needed: f64) -> bool {
        let broke = self.cursor.ensure_space(needed);
        self.sync_pages();
        broke
    }

    /// See [`LayoutCursor::advance`].
    pub fn advance(&mut self, dy: f64) {
        self.cursor.advance(dy);
        self.sync_pages();
    }

    /// Forces a new page unless the current one is still empty.
    pub fn page_break(&mut self) {
        if !self.cursor.at_page_top() {
            self.cursor.page_break();
            self.sync_pages();
        }
    }

    fn sync_pages(&mut self) {
        while self.pages.len() <= self.cursor.page() {
            let index = self.pages.len();
            self.pages.push(RenderedPage::new(index));
        }
    }

    /// The page the cursor is currently on.
    pub fn page(&mut self) -> &mut RenderedPage {
        let index = self.cursor.page();
        &mut self.pages[index]
    }

    /// Records the start of a section on the current page.
    pub fn mark_section(&mut self, title: impl Into<String>) {
        self.outline.push(OutlineMark {
            title: title.into(),
            page: self.cursor.page(),
        });
    }

    /// Number of pages laid out so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in order.
    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }

    /// Mutable access to all pages, used by the footer pass.
    pub fn pages_mut(&mut self) -> &mut [RenderedPage] {
        &mut self.pages
    }

    /// Section marks in the order they were recorded.
    pub fn outline(&self) -> &[OutlineMark] {
        &self.outline
    }

    /// Every text run of the document, page by page.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.iter().flat_map(RenderedPage::texts)
    }

    /// Whether any page contains a text run equal to `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Token;

    #[test]
    fn pages_follow_the_cursor() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        assert_eq!(canvas.page_count(), 1);
        canvas.advance(250.0);
        assert!(canvas.ensure_space(20.0));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.pages()[1].index(), 1);
    }

    #[test]
    fn page_break_on_empty_page_is_ignored() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        canvas.page_break();
        assert_eq!(canvas.page_count(), 1);
        canvas.advance(5.0);
        canvas.page_break();
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn text_is_sanitized_and_blank_text_skipped() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        let style = Token::Body.style();
        canvas.page().text(10.0, 20.0, "Owner\u{2019}s roof", &style);
        canvas.page().text(10.0, 25.0, "   ", &style);
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["Owner's roof"]);
    }

    #[test]
    fn outline_marks_record_current_page() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        canvas.mark_section("Summary");
        canvas.advance(10.0);
        canvas.page_break();
        canvas.mark_section("Justifications");
        let pages: Vec<_> = canvas.outline().iter().map(|mark| mark.page).collect();
        assert_eq!(pages, vec![0, 1]);
    }
}
