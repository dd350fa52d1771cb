//! Built-in Helvetica font family and the metrics used to measure text.
//!
//! Reports only use the two standard Type 1 faces every PDF viewer ships with, so nothing has to
//! be loaded from disk. The advance widths below are the Adobe font metrics for the printable
//! ASCII range, expressed in thousandths of an em.

use std::io;

use genpdf::error::Error;
use genpdf::style::Style;
use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};

use crate::style::PT_TO_MM;

/// Name of the font family used by every report.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Helvetica";

/// Width used for characters outside the printable ASCII range.
const FALLBACK_WIDTH: u16 = 556;

const FIRST_CHAR: u32 = 32;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Font weights available to the reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

impl Weight {
    /// Selects the weight requested by a `genpdf` style.
    pub fn of(style: &Style) -> Self {
        if style.is_bold() {
            Weight::Bold
        } else {
            Weight::Regular
        }
    }

    /// The matching PDF base-14 font.
    pub fn builtin(self) -> BuiltinFont {
        match self {
            Weight::Regular => BuiltinFont::Helvetica,
            Weight::Bold => BuiltinFont::HelveticaBold,
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Weight::Regular => &HELVETICA_WIDTHS,
            Weight::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// Advance width of `ch` in thousandths of an em.
pub fn char_width(ch: char, weight: Weight) -> u16 {
    let code = ch as u32;
    code.checked_sub(FIRST_CHAR)
        .and_then(|offset| weight.widths().get(offset as usize))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Rendered width of `text` in millimetres when drawn with `style`.
pub fn text_width_mm(text: &str, style: &Style) -> f64 {
    let weight = Weight::of(style);
    let units: u32 = text.chars().map(|ch| u32::from(char_width(ch, weight))).sum();
    f64::from(units) / 1000.0 * f64::from(style.font_size()) * PT_TO_MM
}

/// Font references installed into a `printpdf` document.
pub struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl FontSet {
    /// Returns the font reference for the given weight.
    pub fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

fn install(document: &PdfDocumentReference, weight: Weight) -> Result<IndirectFontRef, Error> {
    document.add_builtin_font(weight.builtin()).map_err(|err| {
        Error::new(
            format!(
                "Failed to install built-in font '{}' ({:?}): {}",
                DEFAULT_FONT_FAMILY_NAME, weight, err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Adds the regular and bold Helvetica faces to the given document.
pub fn install_builtin_fonts(document: &PdfDocumentReference) -> Result<FontSet, Error> {
    Ok(FontSet {
        regular: install(document, Weight::Regular)?,
        bold: install(document, Weight::Bold)?,
    })
}
