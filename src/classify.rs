//! Line and block classification.
//!
//! Every cleaned unit of content is exactly one of:
//!
//! | Unit                 | Example              | Class                 |
//! |----------------------|----------------------|-----------------------|
//! | image placeholder    | `[[img:3]]`          | [`Class::Placeholder`] |
//! | heading              | `## Harbour`         | [`Class::Heading`]     |
//! | bullet item          | `- boats` / `* nets` | [`Class::Bullet`]      |
//! | numbered item        | `2. Dock`            | [`Class::Numbered`]    |
//! | anything else        | `The tide was low.`  | [`Class::Paragraph`]   |
//!
//! The checks run in that order and the first match wins, so `1. [[img:1]]`
//! is a numbered item whose text happens to look like a placeholder, while
//! `[[img:1]]` on its own is a placeholder.

use crate::content::Unit;

/// Block kinds the CMS uses for subheadings.
const HEADING_KINDS: &[&str] = &["heading", "heading-one", "headingTwo"];

const HEADING_MARKER: &str = "## ";

/// Syntactic category of one unit, carrying the text with its marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Class {
    /// `[[img:N]]` with the raw 1-based index. Zero is kept so the resolver can reject it.
    Placeholder(usize),
    Heading(String),
    Bullet(String),
    Numbered(String),
    Paragraph(String),
}

/// Classify a unit from either mode.
///
/// The block `kind` only matters for headings: a block declared as a heading
/// is a heading even without the `## ` marker. Unknown kinds are paragraphs.
pub fn classify(unit: &Unit) -> Class {
    let text = unit.text.as_str();

    if let Some(index) = match_placeholder(text) {
        return Class::Placeholder(index);
    }
    if let Some(heading) = match_heading(text) {
        return Class::Heading(heading.to_string());
    }
    if unit
        .kind
        .as_deref()
        .is_some_and(|kind| HEADING_KINDS.contains(&kind))
    {
        return Class::Heading(text.to_string());
    }
    if let Some(item) = match_bullet(text) {
        return Class::Bullet(item.to_string());
    }
    if let Some(item) = match_numbered(text) {
        return Class::Numbered(item.to_string());
    }
    Class::Paragraph(text.to_string())
}

/// Parse a whole-line `[[img:N]]` directive.
///
/// Whitespace is allowed around `img`, the colon, and the digits; `img` is
/// case-insensitive. Indices too large for `usize` saturate, so they never
/// resolve against a real gallery.
///
/// - `"[[img:3]]"` → `Some(3)`
/// - `"[[ IMG : 12 ]]"` → `Some(12)`
/// - `"[[img:-1]]"` → `None`
/// - `"see [[img:1]]"` → `None`
pub fn match_placeholder(line: &str) -> Option<usize> {
    let inner = line.strip_prefix("[[")?.strip_suffix("]]")?;
    let inner = inner.trim_start();
    let keyword = inner.get(..3)?;
    if !keyword.eq_ignore_ascii_case("img") {
        return None;
    }
    let rest = inner[3..].trim_start().strip_prefix(':')?;
    let digits = rest.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}

/// Strip the `## ` heading marker and any whitespace after it.
fn match_heading(line: &str) -> Option<&str> {
    line.starts_with(HEADING_MARKER)
        .then(|| line[2..].trim_start())
}

/// `- item` or `* item`: the marker, at least one whitespace, then content.
pub fn match_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(['-', '*'])?;
    item_content(rest)
}

/// `12. item`: one or more digits, a dot, at least one whitespace, then content.
pub fn match_numbered(line: &str) -> Option<&str> {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }
    let rest = line[digits_end..].strip_prefix('.')?;
    item_content(rest)
}

/// Content after a list marker, which must be separated by whitespace.
///
/// The content itself must fit on one line: a block run like `"- a\nb"` is
/// a paragraph, not an item.
fn item_content(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    (!content.is_empty() && !content.contains(is_line_break)).then_some(content)
}

/// Line terminators, which list item content and highlights never span.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
