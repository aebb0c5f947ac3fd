//! Inline formatting: highlight, bold, italic.
//!
//! Formatting runs as two independent passes so precedence stays obvious:
//!
//! 1. [`split_highlights`] cuts the text on `==…==` (leftmost, shortest match).
//!    Highlighted segments lose their `==` markers plus one optional space on
//!    each side.
//! 2. [`format_emphasis`] runs on every segment, highlighted or not, and cuts
//!    on `**bold**` and `*italic*`.
//!
//! ```text
//! "Read ==**this** now== please"
//!   → Plain("Read "), Highlight[Bold("this"), Plain(" now")], Plain(" please")
//! ```
//!
//! Nothing here can fail. A marker without its closing partner is left in the
//! output as literal text.

use crate::classify::is_line_break;
use crate::types::InlineSpan;

const HIGHLIGHT: &str = "==";

/// A piece of text produced by the highlight pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Outside(&'a str),
    /// Inner text with markers (and one optional space each side) removed.
    Highlighted(&'a str),
}

/// Format a text run into inline spans.
pub fn format_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for segment in split_highlights(text) {
        match segment {
            Segment::Outside(part) => spans.extend(format_emphasis(part)),
            Segment::Highlighted(inner) => {
                spans.push(InlineSpan::highlight(format_emphasis(inner)));
            }
        }
    }
    spans
}

/// Split on `==…==` highlight delimiters.
///
/// A highlight opens and closes on the same line. Empty outside segments are
/// dropped. A highlight whose content is empty (`====`) is still returned so
/// the caller sees the author's marker pair.
pub fn split_highlights(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut outside_start = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(HIGHLIGHT) {
        let open = pos + offset;
        let body_start = open + HIGHLIGHT.len();
        let line = &text[body_start..];
        let line = line.find(is_line_break).map_or(line, |end| &line[..end]);
        let Some(close) = line.find(HIGHLIGHT) else {
            pos = body_start + line.len();
            continue;
        };
        if open > outside_start {
            segments.push(Segment::Outside(&text[outside_start..open]));
        }
        segments.push(Segment::Highlighted(strip_one_space(&line[..close])));
        outside_start = body_start + close + HIGHLIGHT.len();
        pos = outside_start;
    }

    if outside_start < text.len() {
        segments.push(Segment::Outside(&text[outside_start..]));
    }
    segments
}

/// Drop a single leading and a single trailing whitespace character.
fn strip_one_space(inner: &str) -> &str {
    let inner = match inner.chars().next() {
        Some(c) if c.is_whitespace() => &inner[c.len_utf8()..],
        _ => inner,
    };
    match inner.chars().next_back() {
        Some(c) if c.is_whitespace() => &inner[..inner.len() - c.len_utf8()],
        _ => inner,
    }
}

/// Split on `**bold**` and `*italic*`.
///
/// At each `*` the bold form is tried before the italic form. Both require a
/// non-empty run of non-`*` characters between the markers. Everything that
/// does not match is emitted as `Plain`, markers included.
pub fn format_emphasis(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('*') {
        let star = pos + offset;
        let Some((span, end)) = match_bold(text, star).or_else(|| match_italic(text, star)) else {
            pos = star + 1;
            continue;
        };
        if star > plain_start {
            spans.push(InlineSpan::plain(&text[plain_start..star]));
        }
        spans.push(span);
        plain_start = end;
        pos = end;
    }

    if plain_start < text.len() {
        spans.push(InlineSpan::plain(&text[plain_start..]));
    }
    spans
}

/// `**X**` starting at `start`; returns the span and the byte offset after it.
fn match_bold(text: &str, start: usize) -> Option<(InlineSpan, usize)> {
    let body_start = start + 2;
    if !text[start..].starts_with("**") {
        return None;
    }
    let close = body_start + text[body_start..].find('*')?;
    if close == body_start || !text[close..].starts_with("**") {
        return None;
    }
    Some((InlineSpan::bold(&text[body_start..close]), close + 2))
}

/// `*X*` starting at `start`; returns the span and the byte offset after it.
fn match_italic(text: &str, start: usize) -> Option<(InlineSpan, usize)> {
    let body_start = start + 1;
    let close = body_start + text[body_start..].find('*')?;
    if close == body_start {
        return None;
    }
    Some((InlineSpan::italic(&text[body_start..close]), close + 1))
}
