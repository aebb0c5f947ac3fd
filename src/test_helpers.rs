//! Shared test utilities for the article-render test suite.
//!
//! Provides gallery builders, document node shorthands, and assertions that
//! panic with the actual node when a shape does not match.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let g = gallery(&["A", "B"]);
//! let result = render_value(&json!("- a\n[[img:2]]"), &g);
//!
//! assert_eq!(result.document[0], bullets(&["a"]));
//! assert_figure(&result.document[1], "B");
//! assert_eq!(used(&result), vec![2]);
//! ```

use crate::types::{DocumentNode, GalleryImage, InlineSpan, RenderResult};

// =========================================================================
// Gallery builders
// =========================================================================

/// A gallery whose images are identified by their alt text.
///
/// URLs are derived from the alt (`https://cdn.test/a.jpg`), captions are empty.
pub fn gallery(alts: &[&str]) -> Vec<GalleryImage> {
    alts.iter().map(|alt| image_with_caption(alt, "")).collect()
}

/// A single gallery image with an explicit caption.
pub fn image_with_caption(alt: &str, caption: &str) -> GalleryImage {
    GalleryImage {
        url: format!("https://cdn.test/{}.jpg", alt.to_lowercase()),
        alt: alt.to_string(),
        caption: caption.to_string(),
    }
}

// =========================================================================
// Node shorthands: plain-text content only
// =========================================================================

pub fn para(text: &str) -> DocumentNode {
    DocumentNode::Paragraph {
        spans: vec![InlineSpan::plain(text)],
    }
}

pub fn heading(text: &str) -> DocumentNode {
    DocumentNode::Heading {
        spans: vec![InlineSpan::plain(text)],
    }
}

pub fn bullets(items: &[&str]) -> DocumentNode {
    DocumentNode::BulletList {
        items: plain_items(items),
    }
}

pub fn numbered(items: &[&str]) -> DocumentNode {
    DocumentNode::NumberedList {
        items: plain_items(items),
    }
}

fn plain_items(items: &[&str]) -> Vec<Vec<InlineSpan>> {
    items.iter().map(|t| vec![InlineSpan::plain(*t)]).collect()
}

// =========================================================================
// Assertions: panic with the offending node on mismatch
// =========================================================================

/// Assert that a node is an image figure for the image with the given alt.
pub fn assert_figure(node: &DocumentNode, alt: &str) {
    match node {
        DocumentNode::ImageFigure { image, .. } => assert_eq!(
            image.alt, alt,
            "figure shows image '{}', expected '{alt}'",
            image.alt
        ),
        other => panic!("expected image figure for '{alt}', got {other:?}"),
    }
}

/// Used indices in ascending order.
pub fn used(result: &RenderResult) -> Vec<usize> {
    result.used_images.iter().copied().collect()
}
