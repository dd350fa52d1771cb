//! Column-defined tables with category grouping, subtotals and truncated cells.

use std::collections::BTreeSet;

use genpdf::style::{Color, Style};
use genpdf::Alignment;

use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::format;
use crate::model::LineItem;
use crate::section;
use crate::style::{palette, Token};
use crate::text;

/// Height of a body row.
pub const ROW_HEIGHT: f64 = 6.0;
/// Height of the header row.
pub const HEADER_HEIGHT: f64 = 7.0;
/// Horizontal padding inside a cell.
pub const CELL_PADDING: f64 = 1.5;

/// Placeholder drawn instead of an empty line item table.
pub const NO_LINE_ITEMS: &str = "No line items";

/// Label used for items without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One column of a table: header label, offset from the left content edge, width and alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub x: f64,
    pub width: f64,
    pub alignment: Alignment,
}

impl ColumnSpec {
    /// Creates a column definition.
    pub const fn new(label: &'static str, x: f64, width: f64, alignment: Alignment) -> Self {
        Self {
            label,
            x,
            width,
            alignment,
        }
    }
}

/// Orders items by category for callers whose data is not grouped yet.
///
/// The sort is stable, so whatever secondary order the caller chose inside a category is kept.
/// The renderer itself never reorders items.
pub fn sort_line_items(items: &mut [LineItem]) {
    items.sort_by(|a, b| a.category.trim().cmp(b.category.trim()));
}

/// Consecutive items sharing one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup<'a> {
    category: &'a str,
    items: Vec<&'a LineItem>,
}

impl<'a> CategoryGroup<'a> {
    /// The category key as found on the items.
    pub fn category(&self) -> &'a str {
        self.category
    }

    /// Label drawn in the category banner.
    pub fn label(&self) -> &'a str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            self.category
        }
    }

    /// Items of the group in input order.
    pub fn items(&self) -> &[&'a LineItem] {
        &self.items
    }

    /// Sum of `total_price` over the group.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|item| item.total_price).sum()
    }
}

/// Line items partitioned into contiguous category runs.
///
/// Construction checks that the input really is sorted by category: a category that reappears
/// after a different one is rejected instead of producing two banners for the same category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryGroups<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> CategoryGroups<'a> {
    /// Partitions items that are already sorted by category.
    pub fn from_sorted<I>(items: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
        let mut closed: BTreeSet<&'a str> = BTreeSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let category = item.category.trim();
            match groups.last_mut() {
                Some(group) if group.category == category => group.items.push(item),
                last => {
                    if let Some(previous) = last {
                        closed.insert(previous.category);
                    }
                    if closed.contains(category) {
                        return Err(ReportError::UnsortedCategories {
                            index,
                            category: category.to_owned(),
                        });
                    }
                    groups.push(CategoryGroup {
                        category,
                        items: vec![item],
                    });
                }
            }
        }

        Ok(Self { groups })
    }

    /// The groups in order.
    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        &self.groups
    }

    /// Total number of items over all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Whether there are no items at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Items in rendering order.
    pub fn items(&self) -> impl Iterator<Item = &'a LineItem> + '_ {
        self.groups.iter().flat_map(|group| group.items.iter().copied())
    }

    /// Sum of `total_price` over every item.
    pub fn total(&self) -> f64 {
        self.groups.iter().map(CategoryGroup::subtotal).sum()
    }
}

/// What a table render produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TableSummary {
    /// Body rows drawn, excluding header, banners and totals.
    pub rows: usize,
    /// Value shown in the total row.
    pub total: f64,
}

/// Draws rows against a fixed column set, repeating the header after page breaks.
pub struct TableWriter<'c> {
    columns: &'c [ColumnSpec],
}

impl<'c> TableWriter<'c> {
    /// Creates a writer for the given columns.
    pub fn new(columns: &'c [ColumnSpec]) -> Self {
        Self { columns }
    }

    fn full_width(&self) -> f64 {
        self.columns
            .iter()
            .map(|column| column.x + column.width)
            .fold(0.0, f64::max)
    }

    /// Draws the filled header row.
    pub fn header(&self, canvas: &mut Canvas) {
        canvas.ensure_space(HEADER_HEIGHT + ROW_HEIGHT);
        let labels: Vec<&str> = self.columns.iter().map(|column| column.label).collect();
        self.draw(
            canvas,
            HEADER_HEIGHT,
            &labels,
            &Token::TableHeader.style(),
            Some(palette::HEADER_FILL),
        );
    }

    /// Draws one body row, breaking the page first when it does not fit.
    pub fn row<S: AsRef<str>>(
        &self,
        canvas: &mut Canvas,
        cells: &[S],
        style: &Style,
        fill: Option<Color>,
    ) {
        if canvas.ensure_space(ROW_HEIGHT) {
            self.header(canvas);
        }
        self.draw(canvas, ROW_HEIGHT, cells, style, fill);
    }

    /// Draws a row whose label spans all columns but the last, which holds `amount`.
    pub fn banner(
        &self,
        canvas: &mut Canvas,
        label: &str,
        amount: &str,
        style: &Style,
        fill: Color,
        keep_with_next: bool,
    ) {
        let needed = if keep_with_next {
            ROW_HEIGHT * 2.0
        } else {
            ROW_HEIGHT
        };
        if canvas.ensure_space(needed) {
            self.header(canvas);
        }
        let left = canvas.left();
        let y = canvas.y();
        let width = self.full_width();
        let baseline = y + ROW_HEIGHT * 0.68;
        let page = canvas.page();
        page.fill_rect(left, y, width, ROW_HEIGHT, fill);
        let label = text::truncate_to_width(label, width * 0.6, style);
        page.text(left + CELL_PADDING, baseline, &label, style);
        if let Some(last) = self.columns.last() {
            page.text_aligned(
                left + last.x + CELL_PADDING,
                last.width - 2.0 * CELL_PADDING,
                baseline,
                amount,
                style,
                Alignment::Right,
            );
        }
        canvas.advance(ROW_HEIGHT);
    }

    fn draw<S: AsRef<str>>(
        &self,
        canvas: &mut Canvas,
        height: f64,
        cells: &[S],
        style: &Style,
        fill: Option<Color>,
    ) {
        let left = canvas.left();
        let y = canvas.y();
        let width = self.full_width();
        let baseline = y + height * 0.68;
        let page = canvas.page();
        if let Some(fill) = fill {
            page.fill_rect(left, y, width, height, fill);
        }
        for (column, cell) in self.columns.iter().zip(cells) {
            let inner = column.width - 2.0 * CELL_PADDING;
            let content = text::sanitize(cell.as_ref());
            let content = text::truncate_to_width(&content, inner, style);
            page.text_aligned(
                left + column.x + CELL_PADDING,
                inner,
                baseline,
                &content,
                style,
                column.alignment,
            );
        }
        canvas.advance(height);
    }
}

/// Cells of a line item row: code, description, quantity, unit, unit price, total.
pub fn line_item_cells(item: &LineItem) -> [String; 6] {
    [
        item.code.clone(),
        item.description.clone(),
        format::quantity(item.quantity),
        item.unit.clone(),
        format::currency(item.unit_price),
        format::currency(item.total_price),
    ]
}

/// Draws the grouped line item table.
///
/// Every category gets a banner with its subtotal; rows alternate shading within their
/// category and a total row closes the table. An empty item list draws a single
/// [`NO_LINE_ITEMS`] placeholder instead of a table.
pub fn line_item_table(
    canvas: &mut Canvas,
    columns: &[ColumnSpec; 6],
    groups: &CategoryGroups<'_>,
) -> TableSummary {
    if groups.is_empty() {
        section::placeholder(canvas, NO_LINE_ITEMS);
        return TableSummary::default();
    }

    let writer = TableWriter::new(columns);
    let cell_style = Token::TableCell.style();
    let category_style = Token::Category.style();
    let mut rows = 0;

    writer.header(canvas);
    for group in groups.groups() {
        writer.banner(
            canvas,
            group.label(),
            &format::currency(group.subtotal()),
            &category_style,
            palette::CATEGORY_FILL,
            true,
        );
        for (index, item) in group.items().iter().enumerate() {
            let fill = (index % 2 == 1).then_some(palette::ROW_SHADE);
            writer.row(canvas, &line_item_cells(item), &cell_style, fill);
            rows += 1;
        }
    }

    let total = groups.total();
    let total_style = Token::Total.style();
    if canvas.ensure_space(ROW_HEIGHT + 1.0) {
        writer.header(canvas);
    }
    let left = canvas.left();
    let y = canvas.y();
    let right = left + writer.full_width();
    canvas.page().line((left, y), (right, y), palette::HEADER_FILL, 1.0);
    canvas.advance(1.0);
    writer.banner(
        canvas,
        "Total",
        &format::currency(total),
        &total_style,
        palette::ACCENT_TINT,
        false,
    );
    canvas.advance(4.0);

    TableSummary { rows, total }
}

/// Draws an ungrouped table of pre-formatted rows, or `empty_message` when there are none.
pub fn simple_table(
    canvas: &mut Canvas,
    columns: &[ColumnSpec],
    rows: &[Vec<String>],
    empty_message: &str,
) -> TableSummary {
    if rows.is_empty() {
        section::placeholder(canvas, empty_message);
        return TableSummary::default();
    }

    let writer = TableWriter::new(columns);
    let style = Token::TableCell.style();
    writer.header(canvas);
    for (index, cells) in rows.iter().enumerate() {
        let fill = (index % 2 == 1).then_some(palette::ROW_SHADE);
        writer.row(canvas, cells, &style, fill);
    }
    canvas.advance(4.0);

    TableSummary {
        rows: rows.len(),
        total: 0.0,
    }
}
