//! Article input documents.
//!
//! An article input is the already-normalized hand-off from the CMS layer:
//! whatever API shape the CMS returned has been flattened, gallery URLs are
//! absolute, and the raw body is passed through untouched.
//!
//! ```json
//! {
//!   "slug": "harbour-at-dawn",
//!   "title": "Harbour at dawn",
//!   "excerpt": "Boats, nets and gulls.",
//!   "cover": { "url": "https://cdn.example/cover.jpg", "alt": "", "caption": "Courtesy: Port Authority" },
//!   "content": "The tide was low.\n[[img:1]]\n- nets\n- gulls",
//!   "gallery": [
//!     { "url": "https://cdn.example/1.jpg", "alt": "Nets", "caption": "Jane Doe" }
//!   ]
//! }
//! ```
//!
//! `content` stays an untyped JSON value: the mode detector in
//! [`content`](crate::content) decides whether it is text, blocks, or nothing.

use crate::render::render_value;
use crate::types::{GalleryImage, RenderResult, null_as_default};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<GalleryImage>,
    /// Raw body: a micro-markup string, an array of content blocks, or null.
    pub content: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub gallery: Vec<GalleryImage>,
}

const UNTITLED: &str = "Untitled";

/// A `null` title falls back to "Untitled", like a missing one.
fn title_or_untitled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let title = Option::<String>::deserialize(deserializer)?;
    Ok(title.unwrap_or_else(|| UNTITLED.to_string()))
}

impl Default for Article {
    fn default() -> Self {
        Self {
            slug: String::new(),
            title: UNTITLED.to_string(),
            excerpt: None,
            cover: None,
            content: Value::Null,
            gallery: Vec::new(),
        }
    }
}

impl Article {
    /// Load an article input file.
    ///
    /// A missing or empty `slug` is filled in from the file stem so batch
    /// output names stay predictable.
    pub fn load(path: &Path) -> Result<Self, ArticleError> {
        let text = fs::read_to_string(path).map_err(|source| ArticleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut article: Article =
            serde_json::from_str(&text).map_err(|source| ArticleError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if article.slug.trim().is_empty() {
            article.slug = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(article)
    }

    /// Run the rendering engine over this article's body and gallery.
    pub fn render(&self) -> RenderResult {
        render_value(&self.content, &self.gallery)
    }
}
