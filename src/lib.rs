//! # Article Render
//!
//! Turns a CMS article body plus its ordered image gallery into a structured
//! document: paragraphs, headings, grouped lists and image figures placed
//! where the author wrote `[[img:N]]`. Gallery images the body never places
//! are reported as leftovers and shown in a trailing "More photos" section.
//!
//! # Architecture
//!
//! ```text
//! content (JSON)  ─┐
//!                  ├─ render ─→ RenderResult ─┬─ html    → article fragment
//! gallery ─────────┘                          ├─ output  → tree / report
//!                                             └─ serde   → JSON
//! ```
//!
//! The engine ([`render`] and the modules it drives) is pure and never fails.
//! I/O, configuration and error types live only at the edges: [`article`]
//! loads inputs, [`config`] loads presentation copy, [`batch`] walks a
//! directory and writes fragments in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Mode detection (text vs. blocks), invisible-character cleanup, unit extraction |
//! | [`classify`] | Line patterns: placeholder, heading, bullet, numbered, paragraph |
//! | [`inline`] | `==highlight==`, `**bold**` and `*italic*` spans |
//! | [`gallery`] | 1-based image lookup, courtesy text, leftover collection |
//! | [`render`] | Grouping and image resolution into the final document |
//! | [`types`] | Data model shared by every stage (`DocumentNode`, `InlineSpan`, ...) |
//! | [`html`] | Maud rendering of a document into an article fragment |
//! | [`article`] | Article input files |
//! | [`batch`] | Directory build on a rayon pool |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Total, Not Fallible
//!
//! CMS content is written by people. A typo in a placeholder or a gallery
//! that shrank after publishing must not take the page down, so the engine has
//! no error type: unresolvable placeholders are dropped (and listed in
//! [`RenderResult::unresolved_images`] for tooling), unknown block kinds read
//! as paragraphs, and unsupported content shapes render as an empty body.
//!
//! ## One Representation for Both Content Modes
//!
//! Plain strings and structured block arrays are normalized to the same
//! sequence of units before classification. A block array holding the same
//! lines as a string renders to the same document.
//!
//! ## Positions, Not Identities
//!
//! Gallery images are addressed by 1-based position, and "used" is tracked by
//! position. Two gallery entries with the same URL are still two images.

pub mod article;
pub mod batch;
pub mod classify;
pub mod config;
pub mod content;
pub mod gallery;
pub mod html;
pub mod inline;
pub mod output;
pub mod render;
pub mod types;

pub use gallery::{Leftover, leftover_images};
pub use render::{render_content, render_value};
pub use types::{DocumentNode, GalleryImage, InlineSpan, RenderResult};

#[cfg(test)]
pub(crate) mod test_helpers;
