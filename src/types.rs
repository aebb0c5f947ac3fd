//! Shared types produced by the rendering engine.
//!
//! These types flow from the engine ([`render`](crate::render)) to every
//! consumer: the HTML renderer, the CLI tree display, and `--format json`
//! output. They serialize as internally tagged JSON objects so the output is
//! readable without knowing the Rust enum layout:
//!
//! ```text
//! {"type": "paragraph", "spans": [{"type": "plain", "text": "Hello"}]}
//! {"type": "image_figure", "image": {...}, "courtesy": "Jane Doe"}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// One entry of an article's image gallery.
///
/// URLs are already absolute when they reach the engine. Missing and `null`
/// fields deserialize as empty strings so callers never deal with `null`
/// captions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
}

/// Deserialize an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers absent fields; CMS exports routinely send
/// `"caption": null` instead.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inline formatted text inside a paragraph, heading, or list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    Plain { text: String },
    Bold { text: String },
    Italic { text: String },
    /// Highlighted run; may itself contain bold/italic spans.
    Highlight { spans: Vec<InlineSpan> },
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::Italic { text: text.into() }
    }

    pub fn highlight(spans: Vec<InlineSpan>) -> Self {
        Self::Highlight { spans }
    }

    /// Text content with all formatting removed.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain { text } | Self::Bold { text } | Self::Italic { text } => text.clone(),
            Self::Highlight { spans } => spans_text(spans),
        }
    }
}

/// Concatenate the plain text of a span sequence.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::plain_text).collect()
}

/// A block-level node of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentNode {
    Paragraph {
        spans: Vec<InlineSpan>,
    },
    /// Subheading. There is a single heading level inside an article body.
    Heading {
        spans: Vec<InlineSpan>,
    },
    BulletList {
        items: Vec<Vec<InlineSpan>>,
    },
    NumberedList {
        items: Vec<Vec<InlineSpan>>,
    },
    /// A gallery image embedded in place of an `[[img:N]]` placeholder.
    ImageFigure {
        image: GalleryImage,
        /// Attribution derived from the caption. Empty, never absent.
        courtesy: String,
    },
}

/// Output of one render call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderResult {
    pub document: Vec<DocumentNode>,
    /// 1-based gallery positions referenced by at least one resolved placeholder.
    pub used_images: BTreeSet<usize>,
    /// Placeholder indices that did not resolve, in order of appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved_images: Vec<usize>,
}

impl RenderResult {
    /// Number of inline image figures in the document.
    pub fn figure_count(&self) -> usize {
        self.document
            .iter()
            .filter(|node| matches!(node, DocumentNode::ImageFigure { .. }))
            .count()
    }
}
