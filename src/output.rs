//! CLI output formatting.
//!
//! Each display has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, easy to test) and a `print_*` wrapper that writes to stdout.
//!
//! # Output Format
//!
//! ## Document tree (`render --format tree`, `check`)
//!
//! ```text
//! Document
//! 001 Paragraph: The tide was low.
//! 002 Heading: Harbour
//! 003 Bullet list (2 items)
//!     001 nets
//!     002 gulls
//! 004 Figure: Nets
//!     Source: https://cdn.example/1.jpg
//!     Courtesy: Jane Doe
//! ```
//!
//! ## Image report (`check`)
//!
//! ```text
//! Images
//!     Used: 1, 3
//!     Leftover: 002 Boats
//!     Unresolved: [[img:0]], [[img:99]]
//! ```
//!
//! ## Build
//!
//! ```text
//! Harbour at dawn → harbour-at-dawn.html
//!     Source: harbour-at-dawn.json
//!     4 nodes, 1 figure, 1 leftover
//!
//! Rendered 2 articles
//! ```

use crate::batch::{ArticleSummary, BuildEvent, BuildSummary};
use crate::gallery::leftover_images;
use crate::types::{DocumentNode, GalleryImage, InlineSpan, RenderResult, spans_text};

/// Longest inline text shown on a tree line before truncation.
const PREVIEW_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn preview(spans: &[InlineSpan]) -> String {
    truncate(&spans_text(spans), PREVIEW_CHARS)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

// ============================================================================
// Document tree
// ============================================================================

/// Format the document as an indexed tree, one entry per node.
pub fn format_document(document: &[DocumentNode]) -> Vec<String> {
    let mut lines = vec!["Document".to_string()];
    if document.is_empty() {
        lines.push(format!("{}(empty)", indent(1)));
    }

    for (i, node) in document.iter().enumerate() {
        let index = format_index(i + 1);
        match node {
            DocumentNode::Paragraph { spans } => {
                lines.push(format!("{index} Paragraph: {}", preview(spans)));
            }
            DocumentNode::Heading { spans } => {
                lines.push(format!("{index} Heading: {}", preview(spans)));
            }
            DocumentNode::BulletList { items } | DocumentNode::NumberedList { items } => {
                let kind = if matches!(node, DocumentNode::BulletList { .. }) {
                    "Bullet list"
                } else {
                    "Numbered list"
                };
                lines.push(format!("{index} {kind} ({})", plural(items.len(), "item", "items")));
                for (j, item) in items.iter().enumerate() {
                    lines.push(format!("{}{} {}", indent(1), format_index(j + 1), preview(item)));
                }
            }
            DocumentNode::ImageFigure { image, courtesy } => {
                lines.push(format!("{index} Figure: {}", image_label(image)));
                lines.push(format!("{}Source: {}", indent(1), image.url));
                let courtesy = if courtesy.is_empty() { "—" } else { courtesy.as_str() };
                lines.push(format!("{}Courtesy: {}", indent(1), courtesy));
            }
        }
    }
    lines
}

/// Alt text, or the URL in parens when the image has none.
fn image_label(image: &GalleryImage) -> String {
    if image.alt.is_empty() {
        format!("({})", image.url)
    } else {
        image.alt.clone()
    }
}

/// Print the document tree to stdout.
pub fn print_document(document: &[DocumentNode]) {
    for line in format_document(document) {
        println!("{}", line);
    }
}

// ============================================================================
// Image report
// ============================================================================

/// Format which gallery images were used, left over, or requested but missing.
pub fn format_image_report(result: &RenderResult, gallery: &[GalleryImage]) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];

    let used = if result.used_images.is_empty() {
        "none".to_string()
    } else {
        join(result.used_images.iter().map(|i| i.to_string()))
    };
    lines.push(format!("{}Used: {}", indent(1), used));

    for leftover in leftover_images(gallery, &result.used_images) {
        lines.push(format!(
            "{}Leftover: {} {}",
            indent(1),
            format_index(leftover.position),
            image_label(leftover.image)
        ));
    }

    if !result.unresolved_images.is_empty() {
        lines.push(format!(
            "{}Unresolved: {}",
            indent(1),
            join(result.unresolved_images.iter().map(|i| format!("[[img:{i}]]")))
        ));
    }
    lines
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Print the image report to stdout.
pub fn print_image_report(result: &RenderResult, gallery: &[GalleryImage]) {
    for line in format_image_report(result, gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

fn format_article_summary(summary: &ArticleSummary) -> Vec<String> {
    let mut lines = vec![
        format!("{} → {}", summary.title, summary.output.display()),
        format!("{}Source: {}", indent(1), summary.source.display()),
        format!(
            "{}{}, {}, {}",
            indent(1),
            plural(summary.nodes, "node", "nodes"),
            plural(summary.figures, "figure", "figures"),
            plural(summary.leftovers, "leftover", "leftovers"),
        ),
    ];
    if !summary.unresolved.is_empty() {
        lines.push(format!(
            "{}Unresolved: {}",
            indent(1),
            join(summary.unresolved.iter().map(|i| format!("[[img:{i}]]")))
        ));
    }
    lines
}

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::ArticleRendered(summary) => format_article_summary(summary),
    }
}

/// Format the closing line of a build.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut line = format!(
        "Rendered {}",
        plural(summary.articles.len(), "article", "articles")
    );
    let unresolved = summary.unresolved_total();
    if unresolved > 0 {
        line.push_str(&format!(
            ", {}",
            plural(unresolved, "unresolved placeholder", "unresolved placeholders")
        ));
    }
    vec![String::new(), line]
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}
