//! Writes recorded pages into a PDF byte buffer through `printpdf`.

use std::io::{self, BufWriter, Write};

use genpdf::error::{Context as _, Error};
use genpdf::style::Color;
use printpdf::{Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::canvas::{Canvas, DrawOp};
use crate::fonts::{self, FontSet, Weight};

/// Signature every PDF file starts with.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// MIME type of the produced documents.
pub const CONTENT_TYPE: &str = "application/pdf";

const LAYER_NAME: &str = "Content";

/// Whether `bytes` starts with the PDF signature.
pub fn has_pdf_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

fn surface_error(message: &str, err: impl std::fmt::Display) -> Error {
    Error::new(
        format!("{}: {}", message, err),
        io::Error::new(io::ErrorKind::Other, err.to_string()),
    )
}

fn pdf_color(color: Color) -> printpdf::Color {
    let channel = |value: u8| f64::from(value) / 255.0;
    match color {
        Color::Rgb(r, g, b) => {
            printpdf::Color::Rgb(printpdf::Rgb::new(channel(r), channel(g), channel(b), None))
        }
        Color::Cmyk(c, m, y, k) => printpdf::Color::Cmyk(printpdf::Cmyk::new(
            channel(c),
            channel(m),
            channel(y),
            channel(k),
            None,
        )),
        Color::Greyscale(value) => {
            printpdf::Color::Greyscale(printpdf::Greyscale::new(channel(value), None))
        }
    }
}

/// Converts a top-left based position into a PDF point.
fn point(page_height: f64, x: f64, y: f64) -> Point {
    Point::new(Mm(x), Mm(page_height - y))
}

fn draw(layer: &PdfLayerReference, fonts: &FontSet, page_height: f64, op: &DrawOp) {
    match op {
        DrawOp::Text {
            x,
            baseline,
            text,
            style,
        } => {
            let weight = if style.bold {
                Weight::Bold
            } else {
                Weight::Regular
            };
            layer.set_fill_color(pdf_color(style.color));
            layer.use_text(
                text.as_str(),
                style.size.into(),
                Mm(*x),
                Mm(page_height - baseline),
                fonts.get(weight),
            );
        }
        DrawOp::Line {
            from,
            to,
            color,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_shape(Line {
                points: vec![
                    (point(page_height, from.0, from.1), false),
                    (point(page_height, to.0, to.1), false),
                ],
                is_closed: false,
                has_fill: false,
                has_stroke: true,
                is_clipping_path: false,
            });
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            layer.set_fill_color(pdf_color(*fill));
            layer.add_shape(Line {
                points: vec![
                    (point(page_height, *x, *y), false),
                    (point(page_height, x + width, *y), false),
                    (point(page_height, x + width, y + height), false),
                    (point(page_height, *x, y + height), false),
                ],
                is_closed: true,
                has_fill: true,
                has_stroke: false,
                is_clipping_path: false,
            });
        }
    }
}

/// Serializes every page of `canvas` into a PDF document titled `title`.
pub fn write_pdf(canvas: &Canvas, title: &str) -> Result<Vec<u8>, Error> {
    let geometry = canvas.geometry();
    let (document, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(geometry.width),
        Mm(geometry.height),
        LAYER_NAME,
    );
    let fonts = fonts::install_builtin_fonts(&document)?;

    let mut first = Some(document.get_page(first_page).get_layer(first_layer));
    for page in canvas.pages() {
        let layer = match first.take() {
            Some(layer) => layer,
            None => {
                let (page_index, layer_index) =
                    document.add_page(Mm(geometry.width), Mm(geometry.height), LAYER_NAME);
                document.get_page(page_index).get_layer(layer_index)
            }
        };
        for op in page.ops() {
            draw(&layer, &fonts, geometry.height, op);
        }
    }

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        document
            .save(&mut writer)
            .map_err(|err| surface_error("Failed to serialize PDF document", err))?;
        writer.flush().context("Failed to flush PDF buffer")?;
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;
    use crate::style::Token;

    #[test]
    fn output_starts_with_magic_bytes() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        canvas
            .page()
            .text(20.0, 30.0, "Hello, PDF!", &Token::Title.style());
        let bytes = write_pdf(&canvas, "Test").expect("write pdf");
        assert!(has_pdf_signature(&bytes));
    }

    #[test]
    fn more_pages_produce_more_bytes() {
        let single = Canvas::new(PageGeometry::LETTER);
        let mut triple = Canvas::new(PageGeometry::LETTER);
        for _ in 0..2 {
            triple.advance(10.0);
            triple.page_break();
        }
        let single = write_pdf(&single, "Test").expect("write pdf");
        let triple = write_pdf(&triple, "Test").expect("write pdf");
        assert!(triple.len() > single.len());
    }
}
