//! Raw article content and mode detection.
//!
//! The CMS hands over an article body in one of two shapes:
//!
//! - **Text mode**: a single string using the line-oriented micro-markup
//!   (`## heading`, `- item`, `1. item`, `[[img:N]]`, paragraphs).
//! - **Block mode**: an array of content blocks, each with an optional `type`
//!   and a `children` array of inline text runs:
//!
//! ```json
//! [
//!   { "type": "heading", "children": [{ "text": "Harbour" }] },
//!   { "type": "paragraph", "children": [{ "text": "The " }, { "text": "boats" }] }
//! ]
//! ```
//!
//! [`RawContent::from_value`] is the mode detector. Anything that is neither
//! a non-empty string nor an array (null, numbers, objects) is "no content",
//! which renders as an empty document rather than an error.
//!
//! Both modes reduce to the same thing before classification: an ordered list
//! of cleaned, non-empty text units ([`RawContent::units`]).

use serde_json::Value;

/// Characters that render as nothing but survive `trim()`.
///
/// Rich-text editors leave these behind in otherwise empty blocks. They are
/// removed wherever they appear.
const INVISIBLE_CHARS: &[char] = &[
    '\u{200B}', // zero width space
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte order mark / zero width no-break space
];

/// Joiners that shape the text around them (emoji sequences, ZWNJ scripts).
/// Kept in text, but a unit holding nothing else is blank.
const JOINERS: &[char] = &[
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
];

/// Article body as supplied by the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// One structured block in block mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentBlock {
    /// Declared block type (`"paragraph"`, `"heading"`, ...). `None` means paragraph.
    pub kind: Option<String>,
    /// Inline text runs, concatenated in order to form the block text.
    pub runs: Vec<String>,
}

/// A cleaned text unit ready for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub text: String,
    /// Block kind in block mode; always `None` in text mode.
    pub kind: Option<String>,
}

impl RawContent {
    /// Detect the content mode of an untyped JSON value.
    ///
    /// Returns `None` for values that carry no renderable content.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::Blocks(
                items.iter().map(ContentBlock::from_value).collect(),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => None,
        }
    }

    /// Split the content into cleaned, non-empty units in source order.
    pub fn units(&self) -> Vec<Unit> {
        match self {
            Self::Text(text) => text
                .split('\n')
                .map(clean_text)
                .filter(|line| !is_blank(line))
                .map(|text| Unit { text, kind: None })
                .collect(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| {
                    let text = clean_text(&block.text());
                    (!is_blank(&text)).then(|| Unit {
                        text,
                        kind: block.kind.clone(),
                    })
                })
                .collect(),
        }
    }
}

impl ContentBlock {
    pub fn new(kind: Option<&str>, runs: &[&str]) -> Self {
        Self {
            kind: kind.map(String::from),
            runs: runs.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Read a block from its JSON shape.
    ///
    /// Runs come from `children[].text`; a block without a `children` array
    /// falls back to its own `text` field. Non-object values yield an empty
    /// block, which is discarded later.
    pub fn from_value(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(String::from);

        let runs = match value.get("children") {
            Some(Value::Array(children)) => children
                .iter()
                .map(|child| {
                    child
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect(),
            _ => value
                .get("text")
                .and_then(Value::as_str)
                .map(|t| vec![t.to_string()])
                .unwrap_or_default(),
        };

        Self { kind, runs }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.concat()
    }
}

/// Remove invisible characters, then trim surrounding whitespace.
pub fn clean_text(text: &str) -> String {
    text.replace(INVISIBLE_CHARS, "").trim().to_string()
}

/// True when a cleaned unit has nothing visible left: only whitespace and joiners.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || JOINERS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_string_are_no_content() {
        assert_eq!(RawContent::from_value(&Value::Null), None);
        assert_eq!(RawContent::from_value(&json!("")), None);
    }

    #[test]
    fn unsupported_shapes_are_no_content() {
        assert_eq!(RawContent::from_value(&json!(42)), None);
        assert_eq!(RawContent::from_value(&json!(true)), None);
        assert_eq!(RawContent::from_value(&json!({"text": "hi"})), None);
    }

    #[test]
    fn string_is_text_mode() {
        let content = RawContent::from_value(&json!("Hello")).unwrap();
        assert_eq!(content, RawContent::Text("Hello".to_string()));
    }

    #[test]
    fn array_is_block_mode() {
        let content = RawContent::from_value(&json!([
            {"type": "heading", "children": [{"text": "Title"}]},
            {"children": [{"text": "Body "}, {"text": "text"}]}
        ]))
        .unwrap();

        assert_eq!(
            content,
            RawContent::Blocks(vec![
                ContentBlock::new(Some("heading"), &["Title"]),
                ContentBlock::new(None, &["Body ", "text"]),
            ])
        );
    }

    #[test]
    fn block_without_children_uses_text_field() {
        let block = ContentBlock::from_value(&json!({"type": "paragraph", "text": "plain"}));
        assert_eq!(block.text(), "plain");
    }

    #[test]
    fn child_without_text_contributes_nothing() {
        let block = ContentBlock::from_value(&json!({
            "children": [{"type": "link", "url": "x"}, {"text": "after"}]
        }));
        assert_eq!(block.text(), "after");
    }

    #[test]
    fn non_object_block_is_empty() {
        let block = ContentBlock::from_value(&json!("stray"));
        assert_eq!(block, ContentBlock::default());
    }

    #[test]
    fn text_units_are_trimmed_and_blank_lines_dropped() {
        let content = RawContent::Text("  first \n\n   \n\tsecond\r\n".to_string());
        let texts: Vec<String> = content.units().into_iter().map(|u| u.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn invisible_only_units_are_dropped() {
        let content = RawContent::Blocks(vec![
            ContentBlock::new(None, &["\u{200B}"]),
            ContentBlock::new(None, &["\u{FEFF}", " "]),
            ContentBlock::new(Some("heading"), &["Kept"]),
        ]);
        let units = content.units();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Kept");
        assert_eq!(units[0].kind.as_deref(), Some("heading"));
    }

    #[test]
    fn invisible_chars_removed_inside_text() {
        assert_eq!(clean_text("a\u{200B}b\u{2060}c"), "abc");
        assert_eq!(clean_text("\u{FEFF}  - item"), "- item");
    }

    #[test]
    fn joiners_survive_inside_text() {
        let family = "Family \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(clean_text(family), family);
        let zwnj = "\u{645}\u{6CC}\u{200C}\u{62E}\u{648}\u{627}\u{647}\u{645}";
        assert_eq!(clean_text(zwnj), zwnj);
    }

    #[test]
    fn joiner_only_units_are_dropped() {
        let content = RawContent::Blocks(vec![
            ContentBlock::new(None, &["\u{200D}"]),
            ContentBlock::new(None, &[" \u{200C} "]),
            ContentBlock::new(None, &["Kept"]),
        ]);
        let units = content.units();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Kept");
    }
}
