//! Text measurement, word wrapping and truncation.
//!
//! Paragraph-like content (narratives, bullet points) is wrapped and may grow vertically, while
//! single-line content such as table cells is truncated so rows keep a fixed height.

use std::borrow::Cow;
use std::iter::{FusedIterator, Peekable};
use std::str::SplitWhitespace;

use genpdf::style::Style;
use genpdf::Alignment;

use crate::fonts;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Width of `text` in millimetres when drawn with `style`.
pub fn measure(text: &str, style: &Style) -> f64 {
    fonts::text_width_mm(text, style)
}

/// Horizontal start position of `text` inside a box of `width` starting at `x`.
pub fn aligned_x(x: f64, width: f64, text: &str, style: &Style, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Left => x,
        Alignment::Center => x + (width - measure(text, style)) / 2.0,
        Alignment::Right => x + width - measure(text, style),
    }
}

/// Replaces typographic characters the built-in fonts cannot encode with ASCII equivalents.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.is_ascii() && !text.contains(['\t', '\r', '\n']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2026}' => out.push_str(ELLIPSIS),
            '\u{00A0}' | '\t' | '\r' | '\n' => out.push(' '),
            '\u{00B0}' => out.push_str(" deg"),
            '\u{00BD}' => out.push_str("1/2"),
            '\u{00BC}' => out.push_str("1/4"),
            '\u{00BE}' => out.push_str("3/4"),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    Cow::Owned(out)
}

/// Truncates `text` so that it fits into a cell of `width` millimetres.
///
/// Keeps the longest prefix that still fits together with [`ELLIPSIS`]. Text that fits is
/// returned unchanged; a width too narrow for the ellipsis itself yields an empty string.
pub fn truncate_to_width<'a>(text: &'a str, width: f64, style: &Style) -> Cow<'a, str> {
    if measure(text, style) <= width {
        return Cow::Borrowed(text);
    }

    let mut fitted = String::new();
    let mut candidate = String::with_capacity(text.len() + ELLIPSIS.len());
    for (index, ch) in text.char_indices() {
        candidate.clear();
        candidate.push_str(text[..index + ch.len_utf8()].trim_end());
        candidate.push_str(ELLIPSIS);
        if measure(&candidate, style) > width {
            break;
        }
        std::mem::swap(&mut fitted, &mut candidate);
    }
    if fitted.is_empty() && measure(ELLIPSIS, style) <= width {
        fitted.push_str(ELLIPSIS);
    }
    Cow::Owned(fitted)
}

/// Wraps `text` into lines no wider than `max_width` millimetres.
///
/// Wrapping is greedy and never splits a word: a single word wider than `max_width` is emitted
/// on a line of its own. The returned iterator is lazy and can only be consumed once.
pub fn wrap<'a>(text: &'a str, style: &Style, max_width: f64) -> Lines<'a> {
    Lines {
        words: text.split_whitespace().peekable(),
        style: *style,
        max_width,
        space_width: measure(" ", style),
    }
}

/// Lines produced by [`wrap`].
pub struct Lines<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    style: Style,
    max_width: f64,
    space_width: f64,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.words.next()?;
        let mut line = first.to_owned();
        let mut width = measure(first, &self.style);

        while let Some(word) = self.words.peek() {
            let word_width = measure(word, &self.style);
            if width + self.space_width + word_width > self.max_width {
                break;
            }
            line.push(' ');
            line.push_str(word);
            width += self.space_width + word_width;
            self.words.next();
        }

        Some(line)
    }
}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Style {
        Style::new().with_font_size(10)
    }

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "Remove and replace laminated composition shingles including felt underlayment \
                    and starter course along all eaves and rakes";
        let style = body();
        let lines: Vec<_> = wrap(text, &style, 60.0).collect();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line, &style) <= 60.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn wrap_never_splits_words() {
        let style = body();
        let lines: Vec<_> = wrap("Supercalifragilisticexpialidocious ok", &style, 5.0).collect();
        assert_eq!(lines, vec!["Supercalifragilisticexpialidocious", "ok"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert_eq!(wrap("   ", &body(), 50.0).count(), 0);
    }

    #[test]
    fn truncated_text_fits_the_cell() {
        let style = Style::new().with_font_size(8);
        for text in [
            "WWWWWWWWWWWWWWWWWW",
            "MMMMMMMM mmmmmmmm",
            "Remove and replace laminated composition shingles",
            "iiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiiii",
        ] {
            let truncated = truncate_to_width(text, 19.0, &style);
            assert!(truncated.ends_with(ELLIPSIS), "{text} not truncated");
            assert!(measure(&truncated, &style) <= 19.0, "{truncated} too wide");
        }
    }

    #[test]
    fn truncation_keeps_the_longest_prefix() {
        let style = body();
        let text = "Drip edge - aluminum";
        let width = measure("Drip ed...", &style);
        assert_eq!(truncate_to_width(text, width, &style), "Drip ed...");
        assert_eq!(truncate_to_width("Short", 50.0, &style), "Short");
    }

    #[test]
    fn truncation_trims_trailing_space_before_ellipsis() {
        let style = body();
        let width = measure("Ridge ...", &style);
        assert_eq!(truncate_to_width("Ridge cap shingles", width, &style), "Ridge...");
    }

    #[test]
    fn wide_glyphs_truncate_earlier_than_narrow_ones() {
        let style = body();
        let wide = truncate_to_width("WWWWWWWWWWWWWWWWWWWW", 30.0, &style);
        let narrow = truncate_to_width("llllllllllllllllllllllllllllllllllllllllllllllllllllllll", 30.0, &style);
        assert!(wide.len() < narrow.len());
        assert_eq!(truncate_to_width("Anything", 0.5, &style), "");
    }

    #[test]
    fn sanitize_replaces_typographic_marks() {
        assert_eq!(sanitize("It\u{2019}s \u{201C}fine\u{201D} \u{2014} ok\u{2026}"), "It's \"fine\" - ok...");
        assert!(matches!(sanitize("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn right_alignment_ends_at_box_edge() {
        let style = body();
        let x = aligned_x(10.0, 40.0, "$1,250.00", &style, Alignment::Right);
        assert!((x + measure("$1,250.00", &style) - 50.0).abs() < 1e-9);
    }
}
