//! Splitting free-form justification narratives into bullet points and drawing them.
//!
//! The narratives come from people and from text extraction, so there is no structure to rely
//! on. [`split_points`] applies a fixed fallback chain: numbered list, bullet markers, sentences
//! and finally the whole text as a single point. Numerals that are not list markers or dashes
//! used for emphasis can therefore be mis-split; the chain is best effort by nature.

use genpdf::style::Style;

use crate::canvas::Canvas;
use crate::model::LineItem;
use crate::section;
use crate::style::{line_height, palette, Token};
use crate::text;

/// Placeholder drawn when no item carries a justification.
pub const NO_JUSTIFICATIONS: &str = "No justifications provided";

const BULLET_INDENT: f64 = 5.0;
const BULLET_SIZE: f64 = 1.2;
const ENTRY_GAP: f64 = 3.0;

/// Which rule of the fallback chain produced the points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitStrategy {
    /// `1.` / `1)` markers, numbered consecutively from one.
    Numbered,
    /// `•` characters, `- ` dashes or `* ` asterisks introducing each point.
    Bulleted,
    /// Two or more sentences.
    Sentences,
    /// The trimmed text as one point.
    Whole,
}

/// Result of [`split_points`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Points {
    pub strategy: SplitStrategy,
    pub points: Vec<String>,
}

impl Points {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the text was blank.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Splits a justification narrative into discrete points.
pub fn split_points(narrative: &str) -> Points {
    let narrative = narrative.trim();
    if narrative.is_empty() {
        return Points {
            strategy: SplitStrategy::Whole,
            points: Vec::new(),
        };
    }

    let attempts: [(SplitStrategy, fn(&str) -> Option<Vec<String>>); 3] = [
        (SplitStrategy::Numbered, split_numbered),
        (SplitStrategy::Bulleted, split_bulleted),
        (SplitStrategy::Sentences, split_sentences),
    ];
    for (strategy, split) in attempts {
        if let Some(points) = split(narrative) {
            return Points { strategy, points };
        }
    }

    Points {
        strategy: SplitStrategy::Whole,
        points: vec![narrative.to_owned()],
    }
}

#[derive(Clone, Copy, Debug)]
struct Marker {
    start: usize,
    end: usize,
    number: u32,
}

/// Finds `N.` / `N)` markers that start a word and are followed by whitespace.
fn numbered_markers(narrative: &str) -> Vec<Marker> {
    let bytes = narrative.as_bytes();
    let mut markers = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let at_word_start = index == 0 || bytes[index - 1].is_ascii_whitespace();
        if at_word_start && bytes[index].is_ascii_digit() {
            let mut digits_end = index;
            while digits_end < bytes.len()
                && bytes[digits_end].is_ascii_digit()
                && digits_end - index < 2
            {
                digits_end += 1;
            }
            let delimited = digits_end + 1 < bytes.len()
                && matches!(bytes[digits_end], b'.' | b')')
                && bytes[digits_end + 1].is_ascii_whitespace();
            if delimited {
                if let Ok(number) = narrative[index..digits_end].parse() {
                    markers.push(Marker {
                        start: index,
                        end: digits_end + 1,
                        number,
                    });
                    index = digits_end + 1;
                    continue;
                }
            }
        }
        index += 1;
    }

    markers
}

fn split_numbered(narrative: &str) -> Option<Vec<String>> {
    let mut expected = 1;
    let markers: Vec<Marker> = numbered_markers(narrative)
        .into_iter()
        .filter(|marker| {
            if marker.number == expected {
                expected += 1;
                true
            } else {
                false
            }
        })
        .collect();
    if markers.len() < 2 {
        return None;
    }

    let mut pieces = vec![&narrative[..markers[0].start]];
    for (index, marker) in markers.iter().enumerate() {
        let end = markers
            .get(index + 1)
            .map_or(narrative.len(), |next| next.start);
        pieces.push(&narrative[marker.end..end]);
    }
    Some(collect_points(pieces))
}

/// Whether `bytes[index]` is a `- ` or `* ` marker starting a word.
fn is_marker(bytes: &[u8], index: usize, marker: u8) -> bool {
    bytes[index] == marker
        && bytes
            .get(index + 1)
            .is_some_and(|next| next.is_ascii_whitespace())
        && (index == 0 || bytes[index - 1].is_ascii_whitespace())
}

/// Splits on `marker` when it clearly introduces list entries: the text opens with it, a line
/// opens with it, or it appears at least twice. A lone inline dash is punctuation, not a list.
fn split_on_marker(narrative: &str, marker: u8) -> Option<Vec<String>> {
    let bytes = narrative.as_bytes();
    let positions: Vec<usize> = (0..bytes.len())
        .filter(|&index| is_marker(bytes, index, marker))
        .collect();
    let first = *positions.first()?;
    let opens_line = |index: usize| {
        narrative[..index]
            .trim_end_matches([' ', '\t'])
            .ends_with('\n')
    };
    let is_list = first == 0
        || positions.len() >= 2
        || positions.iter().any(|&index| opens_line(index));
    if !is_list {
        return None;
    }

    let mut pieces = Vec::with_capacity(positions.len() + 1);
    let mut start = 0;
    for index in positions {
        pieces.push(&narrative[start..index]);
        start = index + 1;
    }
    pieces.push(&narrative[start..]);
    Some(collect_points(pieces)).filter(|points| !points.is_empty())
}

fn split_bulleted(narrative: &str) -> Option<Vec<String>> {
    if narrative.contains('\u{2022}') {
        return Some(collect_points(narrative.split('\u{2022}'))).filter(|p| !p.is_empty());
    }
    split_on_marker(narrative, b'-').or_else(|| split_on_marker(narrative, b'*'))
}

fn split_sentences(narrative: &str) -> Option<Vec<String>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = narrative.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let ends_sentence = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if ends_sentence {
            let end = index + ch.len_utf8();
            sentences.push(&narrative[start..end]);
            start = end;
        }
    }
    sentences.push(&narrative[start..]);

    let points = collect_points(sentences);
    (points.len() >= 2).then_some(points)
}

fn collect_points<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(|piece| piece.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Draws one wrapped bullet point indented by `indent` from the content edge.
pub fn bullet(canvas: &mut Canvas, point: &str, style: &Style, indent: f64) {
    let height = line_height(style);
    let x = canvas.left() + indent;
    let width = canvas.content_width() - indent - BULLET_INDENT;
    let point = text::sanitize(point);

    for (index, line) in text::wrap(&point, style, width).enumerate() {
        canvas.ensure_space(height);
        let baseline = canvas.y() + height * 0.8;
        let page = canvas.page();
        if index == 0 {
            let glyph_top = baseline - height * 0.45;
            page.fill_rect(x + 1.0, glyph_top, BULLET_SIZE, BULLET_SIZE, palette::ACCENT);
        }
        page.text(x + BULLET_INDENT, baseline, &line, style);
        canvas.advance(height);
    }
}

/// Draws every point as a bullet.
pub fn bullet_list<S: AsRef<str>>(canvas: &mut Canvas, points: &[S], style: &Style) {
    for point in points {
        bullet(canvas, point.as_ref(), style, 0.0);
    }
}

/// Draws the code reference line beneath the last point of an item.
pub fn code_reference(canvas: &mut Canvas, reference: &str, indent: f64) {
    let style = Token::CodeReference.style();
    let height = line_height(&style);
    let x = canvas.left() + indent + BULLET_INDENT;
    let width = canvas.content_width() - indent - BULLET_INDENT;
    let line = format!("Reference: {}", reference.trim());

    for line in text::wrap(&text::sanitize(&line), &style, width) {
        canvas.ensure_space(height);
        let baseline = canvas.y() + height * 0.8;
        canvas.page().text(x, baseline, &line, &style);
        canvas.advance(height);
    }
}

/// Draws the heading, points and optional code reference of one line item.
///
/// Returns the number of points drawn.
pub fn justification_entry(canvas: &mut Canvas, item: &LineItem) -> usize {
    let heading_style = Token::BodyStrong.style();
    let category_style = Token::Label.style();
    let body_style = Token::Body.style();
    let heading_height = line_height(&heading_style);

    canvas.ensure_space(heading_height + 2.0 * line_height(&body_style));
    let left = canvas.left();
    let width = canvas.content_width();
    let baseline = canvas.y() + heading_height * 0.8;
    let heading = match (item.code.trim(), item.description.trim()) {
        ("", description) => description.to_owned(),
        (code, "") => code.to_owned(),
        (code, description) => format!("{code} - {description}"),
    };
    let category = item.category.trim();
    let heading_width = if category.is_empty() {
        width
    } else {
        width * 0.75
    };
    let heading = text::truncate_to_width(&heading, heading_width, &heading_style).into_owned();

    let page = canvas.page();
    page.text(left, baseline, &heading, &heading_style);
    if !category.is_empty() {
        page.text_aligned(
            left,
            width,
            baseline,
            category,
            &category_style,
            genpdf::Alignment::Right,
        );
    }
    canvas.advance(heading_height + 0.5);

    let points = split_points(&item.justification);
    for point in &points.points {
        bullet(canvas, point, &body_style, 2.0);
    }
    if let Some(reference) = crate::format::non_blank(item.code_reference.as_deref()) {
        code_reference(canvas, reference, 2.0);
    }
    canvas.advance(ENTRY_GAP);

    points.len()
}

/// Draws an entry for every item with a justification, or a placeholder when none has one.
///
/// Returns the number of items drawn.
pub fn justification_list<'a>(
    canvas: &mut Canvas,
    items: impl IntoIterator<Item = &'a LineItem>,
) -> usize {
    let mut drawn = 0;
    for item in items.into_iter().filter(|item| item.has_justification()) {
        justification_entry(canvas, item);
        drawn += 1;
    }
    if drawn == 0 {
        section::placeholder(canvas, NO_JUSTIFICATIONS);
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    #[test]
    fn numbered_list_is_split_on_markers() {
        let points = split_points("1. First point 2. Second point");
        assert_eq!(points.strategy, SplitStrategy::Numbered);
        assert_eq!(points.points, vec!["First point", "Second point"]);
    }

    #[test]
    fn parenthesised_numbers_with_preamble() {
        let points = split_points("Required by code: 1) Drip edge at eaves 2) Ice barrier 3) Starter");
        assert_eq!(
            points.points,
            vec!["Required by code:", "Drip edge at eaves", "Ice barrier", "Starter"]
        );
    }

    #[test]
    fn prices_and_decimals_are_not_list_markers() {
        let points = split_points("Replace 2.5 squares at $1.50 per foot");
        assert_eq!(points.strategy, SplitStrategy::Whole);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn a_single_numbered_marker_is_not_a_list() {
        let points = split_points("Step 1. was skipped by the adjuster");
        assert_ne!(points.strategy, SplitStrategy::Numbered);
    }

    #[test]
    fn bullet_characters_split_points() {
        let points = split_points("\u{2022} Shingles brittle \u{2022} Granule loss on south slope");
        assert_eq!(points.strategy, SplitStrategy::Bulleted);
        assert_eq!(points.points, vec!["Shingles brittle", "Granule loss on south slope"]);
    }

    #[test]
    fn dash_lines_split_points() {
        let points = split_points("Missing from estimate:\n- Drip edge\n- Step flashing");
        assert_eq!(points.strategy, SplitStrategy::Bulleted);
        assert_eq!(
            points.points,
            vec!["Missing from estimate:", "Drip edge", "Step flashing"]
        );
    }

    #[test]
    fn asterisks_split_points() {
        let points = split_points("* Shingles brittle * Granule loss on south slope");
        assert_eq!(points.strategy, SplitStrategy::Bulleted);
        assert_eq!(points.points, vec!["Shingles brittle", "Granule loss on south slope"]);
    }

    #[test]
    fn repeated_inline_dashes_split_points() {
        let points = split_points("Missing items - drip edge - starter strip - ridge cap");
        assert_eq!(points.strategy, SplitStrategy::Bulleted);
        assert_eq!(
            points.points,
            vec!["Missing items", "drip edge", "starter strip", "ridge cap"]
        );
    }

    #[test]
    fn single_inline_dash_is_punctuation() {
        let points = split_points("Drip edge - aluminum is bent beyond repair");
        assert_eq!(points.strategy, SplitStrategy::Whole);
    }

    #[test]
    fn hyphenated_words_are_not_bullets() {
        let points = split_points("Re-roof requires code-compliant starter strip");
        assert_eq!(points.strategy, SplitStrategy::Whole);
    }

    #[test]
    fn multiple_sentences_split() {
        let points = split_points("Manufacturer requires starter. Warranty is void otherwise! Is it owed?");
        assert_eq!(points.strategy, SplitStrategy::Sentences);
        assert_eq!(
            points.points,
            vec![
                "Manufacturer requires starter.",
                "Warranty is void otherwise!",
                "Is it owed?"
            ]
        );
    }

    #[test]
    fn plain_text_is_one_point() {
        let text = "Replace damaged drip edge along eaves";
        let points = split_points(text);
        assert_eq!(points.strategy, SplitStrategy::Whole);
        assert_eq!(points.points, vec![text]);
    }

    #[test]
    fn single_sentence_is_one_point() {
        let points = split_points("  Ridge vent is required for ventilation.  ");
        assert_eq!(points.points, vec!["Ridge vent is required for ventilation."]);
    }

    #[test]
    fn blank_text_has_no_points() {
        assert!(split_points(" \n ").is_empty());
    }

    #[test]
    fn entry_draws_code_reference_after_points() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        let item = LineItem::new("RFG DRIP", "Drip edge", "Roofing")
            .with_justification("1. Required at eaves 2. Required at rakes")
            .with_code_reference(Some("IRC R905.2.8.5".to_owned()));
        assert_eq!(justification_entry(&mut canvas, &item), 2);

        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(
            texts,
            vec![
                "RFG DRIP - Drip edge",
                "Roofing",
                "Required at eaves",
                "Required at rakes",
                "Reference: IRC R905.2.8.5"
            ]
        );
    }

    #[test]
    fn list_without_justifications_draws_placeholder() {
        let mut canvas = Canvas::new(PageGeometry::LETTER);
        let items = vec![LineItem::new("A", "a", "Roofing")];
        assert_eq!(justification_list(&mut canvas, &items), 0);
        assert!(canvas.contains_text(NO_JUSTIFICATIONS));
    }
}
