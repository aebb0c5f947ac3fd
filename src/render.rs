//! The rendering engine: raw content + gallery → [`RenderResult`].
//!
//! ## Pipeline
//!
//! ```text
//! serde_json::Value
//!   │  RawContent::from_value        text mode | block mode | nothing
//!   ▼
//! Peekable<Unit>                     cleaned, non-empty lines or blocks
//!   │  classify                      placeholder > heading > bullet > numbered > paragraph
//!   │  group                         following units whose text has the same list marker
//!   │                                join the list node
//!   │  format_inline                 spans for paragraphs, headings, list items
//!   │  image_at                      placeholders → figures, or dropped
//!   ▼
//! RenderResult { document, used_images, unresolved_images }
//! ```
//!
//! The engine is pure: no I/O, no shared state, same input → same output. It
//! never fails; anything it cannot make sense of is omitted.

use crate::classify::{Class, classify, match_bullet, match_numbered};
use crate::content::{RawContent, Unit};
use crate::gallery::{courtesy_text, image_at};
use crate::inline::format_inline;
use crate::types::{DocumentNode, GalleryImage, InlineSpan, RenderResult};
use serde_json::Value;
use std::iter::Peekable;
use tracing::debug;

/// Render untyped CMS content against a gallery.
///
/// `null`, empty strings, and unsupported JSON shapes produce an empty result.
pub fn render_value(content: &Value, gallery: &[GalleryImage]) -> RenderResult {
    match RawContent::from_value(content) {
        Some(raw) => render_content(&raw, gallery),
        None => RenderResult::default(),
    }
}

/// Render typed content against a gallery.
pub fn render_content(content: &RawContent, gallery: &[GalleryImage]) -> RenderResult {
    let units = content.units();
    let mut renderer = Renderer {
        gallery,
        result: RenderResult::default(),
    };
    renderer.run(units.iter().peekable());
    renderer.result
}

struct Renderer<'a> {
    gallery: &'a [GalleryImage],
    result: RenderResult,
}

impl Renderer<'_> {
    fn run<'u>(&mut self, mut units: Peekable<impl Iterator<Item = &'u Unit>>) {
        while let Some(unit) = units.next() {
            let node = match classify(unit) {
                Class::Placeholder(index) => self.resolve(index),
                Class::Heading(text) => Some(DocumentNode::Heading {
                    spans: format_inline(&text),
                }),
                Class::Paragraph(text) => Some(DocumentNode::Paragraph {
                    spans: format_inline(&text),
                }),
                Class::Bullet(first) => Some(DocumentNode::BulletList {
                    items: collect_run(&first, &mut units, match_bullet),
                }),
                Class::Numbered(first) => Some(DocumentNode::NumberedList {
                    items: collect_run(&first, &mut units, match_numbered),
                }),
            };
            self.result.document.extend(node);
        }
    }

    /// Turn a placeholder into a figure, marking its index used.
    fn resolve(&mut self, index: usize) -> Option<DocumentNode> {
        let Some(image) = image_at(self.gallery, index) else {
            debug!(
                index,
                gallery_len = self.gallery.len(),
                "dropping unresolvable image placeholder"
            );
            self.result.unresolved_images.push(index);
            return None;
        };
        self.result.used_images.insert(index);
        Some(DocumentNode::ImageFigure {
            image: image.clone(),
            courtesy: courtesy_text(&image.caption),
        })
    }
}

/// Consume the maximal run of units whose text is another item of the same list.
///
/// Continuation looks at the text only, so a block declared as a heading still
/// joins the list when its text carries the list marker.
fn collect_run<'u>(
    first: &str,
    units: &mut Peekable<impl Iterator<Item = &'u Unit>>,
    item_text: fn(&str) -> Option<&str>,
) -> Vec<Vec<InlineSpan>> {
    let mut items = vec![format_inline(first)];
    while let Some(unit) = units.next_if(|unit| item_text(&unit.text).is_some()) {
        if let Some(text) = item_text(&unit.text) {
            items.push(format_inline(text));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;
    use crate::test_helpers::*;
    use serde_json::json;

    fn render_text(text: &str, gallery: &[GalleryImage]) -> RenderResult {
        render_value(&json!(text), gallery)
    }

    // =========================================================================
    // Mode detection
    // =========================================================================

    #[test]
    fn null_content_renders_empty() {
        let result = render_value(&Value::Null, &gallery(&["A"]));
        assert_eq!(result, RenderResult::default());
    }

    #[test]
    fn unsupported_shape_renders_empty() {
        let result = render_value(&json!({"body": "text"}), &gallery(&["A"]));
        assert!(result.document.is_empty());
        assert!(result.used_images.is_empty());
    }

    #[test]
    fn whitespace_only_text_renders_empty() {
        let result = render_text(" \n\n\t\n", &[]);
        assert!(result.document.is_empty());
    }

    // =========================================================================
    // Node kinds
    // =========================================================================

    #[test]
    fn paragraph_per_line() {
        let result = render_text("First line.\nSecond line.", &[]);
        assert_eq!(
            result.document,
            vec![para("First line."), para("Second line.")]
        );
    }

    #[test]
    fn heading_gets_inline_formatting() {
        let result = render_text("## The **big** day", &[]);
        assert_eq!(
            result.document,
            vec![DocumentNode::Heading {
                spans: vec![
                    InlineSpan::plain("The "),
                    InlineSpan::bold("big"),
                    InlineSpan::plain(" day"),
                ],
            }]
        );
    }

    #[test]
    fn list_items_are_formatted_without_marker() {
        let result = render_text("- *one*\n- two", &[]);
        assert_eq!(
            result.document,
            vec![DocumentNode::BulletList {
                items: vec![
                    vec![InlineSpan::italic("one")],
                    vec![InlineSpan::plain("two")],
                ],
            }]
        );
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn heading_interrupts_bullet_list() {
        let result = render_text("- a\n- b\n## Head\n- c", &[]);
        assert_eq!(
            result.document,
            vec![
                bullets(&["a", "b"]),
                heading("Head"),
                bullets(&["c"]),
            ]
        );
    }

    #[test]
    fn mixed_bullet_markers_group_together() {
        let result = render_text("- a\n* b\n-  c", &[]);
        assert_eq!(result.document, vec![bullets(&["a", "b", "c"])]);
    }

    #[test]
    fn numbered_list_groups_regardless_of_numbers() {
        let result = render_text("1. a\n1. b\n7. c", &[]);
        assert_eq!(result.document, vec![numbered(&["a", "b", "c"])]);
    }

    #[test]
    fn bullet_then_numbered_are_separate_lists() {
        let result = render_text("- a\n1. b\n- c", &[]);
        assert_eq!(
            result.document,
            vec![bullets(&["a"]), numbered(&["b"]), bullets(&["c"])]
        );
    }

    #[test]
    fn blank_lines_do_not_break_a_list() {
        let result = render_text("- a\n\n   \n- b", &[]);
        assert_eq!(result.document, vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn placeholder_interrupts_list() {
        let g = gallery(&["A"]);
        let result = render_text("- a\n[[img:1]]\n- b", &g);
        assert_eq!(result.document.len(), 3);
        assert_eq!(result.document[0], bullets(&["a"]));
        assert_figure(&result.document[1], "A");
        assert_eq!(result.document[2], bullets(&["b"]));
    }

    #[test]
    fn dropped_placeholder_still_interrupts_list() {
        let result = render_text("- a\n[[img:9]]\n- b", &[]);
        assert_eq!(result.document, vec![bullets(&["a"]), bullets(&["b"])]);
    }

    // =========================================================================
    // Images
    // =========================================================================

    #[test]
    fn placeholders_resolve_one_based() {
        let g = gallery(&["A", "B", "C"]);
        let result = render_text("[[img:1]]\n[[img:3]]", &g);

        assert_eq!(result.figure_count(), 2);
        assert_figure(&result.document[0], "A");
        assert_figure(&result.document[1], "C");
        assert_eq!(used(&result), vec![1, 3]);
    }

    #[test]
    fn invalid_indices_are_dropped() {
        let g = gallery(&["A", "B", "C"]);
        let result = render_text("[[img:0]]\n[[img:99]]", &g);

        assert!(result.document.is_empty());
        assert!(result.used_images.is_empty());
        assert_eq!(result.unresolved_images, vec![0, 99]);
    }

    #[test]
    fn repeated_placeholder_resolves_each_time() {
        let g = gallery(&["A", "B"]);
        let result = render_text("[[img:2]]\ntext\n[[img:2]]", &g);

        assert_eq!(result.figure_count(), 2);
        assert_eq!(used(&result), vec![2]);
    }

    #[test]
    fn figure_carries_courtesy() {
        let g = vec![image_with_caption("A", "Courtesy: Jane Doe")];
        let result = render_text("[[img:1]]", &g);
        assert_eq!(
            result.document,
            vec![DocumentNode::ImageFigure {
                image: g[0].clone(),
                courtesy: "Jane Doe".to_string(),
            }]
        );
    }

    #[test]
    fn figures_stay_in_place() {
        let g = gallery(&["A"]);
        let result = render_text("before\n[[img:1]]\nafter", &g);
        assert_eq!(result.document[0], para("before"));
        assert_figure(&result.document[1], "A");
        assert_eq!(result.document[2], para("after"));
    }

    #[test]
    fn inline_placeholder_in_sentence_is_paragraph_text() {
        let g = gallery(&["A"]);
        let result = render_text("See [[img:1]] here", &g);
        assert_eq!(result.document, vec![para("See [[img:1]] here")]);
        assert!(result.used_images.is_empty());
    }

    // =========================================================================
    // Block mode
    // =========================================================================

    #[test]
    fn block_mode_heading_kind() {
        let content = RawContent::Blocks(vec![
            ContentBlock::new(Some("heading"), &["Harbour"]),
            ContentBlock::new(Some("paragraph"), &["Boats ", "everywhere"]),
        ]);
        let result = render_content(&content, &[]);
        assert_eq!(
            result.document,
            vec![heading("Harbour"), para("Boats everywhere")]
        );
    }

    #[test]
    fn block_mode_groups_lists_across_empty_blocks() {
        let content = RawContent::Blocks(vec![
            ContentBlock::new(None, &["- a"]),
            ContentBlock::new(None, &["\u{200B}"]),
            ContentBlock::new(None, &["- b"]),
        ]);
        let result = render_content(&content, &[]);
        assert_eq!(result.document, vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn heading_block_with_list_marker_joins_running_list() {
        let blocks = json!([
            {"children": [{"text": "- a"}]},
            {"type": "heading", "children": [{"text": "- b"}]}
        ]);
        let result = render_value(&blocks, &[]);
        assert_eq!(result.document, vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn heading_block_with_list_marker_starts_as_heading() {
        let blocks = json!([
            {"type": "heading", "children": [{"text": "- b"}]},
            {"children": [{"text": "- c"}]}
        ]);
        let result = render_value(&blocks, &[]);
        assert_eq!(result.document, vec![heading("- b"), bullets(&["c"])]);
    }

    #[test]
    fn block_mode_matches_text_mode() {
        let g = gallery(&["A", "B"]);
        let text = "Intro **bold**\n## Section\n- x\n- y\n[[img:2]]\n1. one\n2. two";
        let blocks = json!([
            {"type": "paragraph", "children": [{"text": "Intro "}, {"text": "**bold**"}]},
            {"type": "heading", "children": [{"text": "Section"}]},
            {"type": "paragraph", "children": [{"text": "- x"}]},
            {"type": "paragraph", "children": [{"text": "- y"}]},
            {"type": "paragraph", "children": [{"text": "[[img:2]]"}]},
            {"children": [{"text": "1. one"}]},
            {"children": [{"text": "2. two"}]}
        ]);

        let from_text = render_text(text, &g);
        let from_blocks = render_value(&blocks, &g);
        assert_eq!(from_text, from_blocks);
    }

    #[test]
    fn emoji_joiners_are_preserved() {
        let family = "Family \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let result = render_text(family, &[]);
        assert_eq!(result.document, vec![para(family)]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let g = gallery(&["A", "B", "C"]);
        let text = "## H\n- a\n- b\n[[img:2]]\n==**x**== *y*\n[[img:7]]";
        assert_eq!(render_text(text, &g), render_text(text, &g));
    }
}
