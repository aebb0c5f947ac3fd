//! Batch rendering of a directory of article inputs.
//!
//! ```text
//! articles/                        out/
//! ├── harbour-at-dawn.json   →     ├── harbour-at-dawn.html
//! └── 2024/                        └── market-day.html
//!     └── market-day.json
//! ```
//!
//! Input files are discovered recursively (`*.json`, sorted by file name),
//! loaded, checked for slug collisions, then rendered and written in
//! parallel. Each article is still rendered by a single call into the pure
//! engine; parallelism is only across articles.
//!
//! Progress is reported through an optional channel of [`BuildEvent`]s so the
//! CLI can print while the pool keeps working. The returned [`BuildSummary`]
//! lists articles in discovery order regardless of completion order.

use crate::article::{Article, ArticleError};
use crate::config::{RenderConfig, effective_threads};
use crate::gallery::leftover_images;
use crate::html::render_article;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Article(#[from] ArticleError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Slug '{slug}' is used by both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Invalid slug '{slug}' in {path}")]
    InvalidSlug { slug: String, path: PathBuf },
}

/// Per-article outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    /// Input path relative to the source directory.
    pub source: PathBuf,
    pub slug: String,
    pub title: String,
    /// Written fragment, relative to the output directory.
    pub output: PathBuf,
    pub nodes: usize,
    pub figures: usize,
    pub leftovers: usize,
    /// Placeholder indices that did not resolve.
    pub unresolved: Vec<usize>,
}

#[derive(Debug, Clone)]
pub enum BuildEvent {
    ArticleRendered(ArticleSummary),
}

#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub articles: Vec<ArticleSummary>,
}

impl BuildSummary {
    pub fn unresolved_total(&self) -> usize {
        self.articles.iter().map(|a| a.unresolved.len()).sum()
    }
}

/// Find article input files under `source`, sorted by file name at each level.
pub fn discover_articles(source: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut paths = Vec::new();
    for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Render every article under `source` into `output`.
pub fn build(
    source: &Path,
    output: &Path,
    config: &RenderConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, BuildError> {
    let paths = discover_articles(source)?;
    info!(count = paths.len(), source = %source.display(), "discovered article inputs");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(effective_threads(&config.processing))
        .build()?;

    let articles = pool.install(|| {
        paths
            .par_iter()
            .map(|path| Article::load(path).map(|article| (path.as_path(), article)))
            .collect::<Result<Vec<_>, _>>()
    })?;
    check_slugs(&articles)?;

    fs::create_dir_all(output)?;

    let summaries = pool.install(|| {
        articles
            .par_iter()
            .map_with(events, |events, (path, article)| {
                let summary = render_one(source, path, article, output, config)?;
                if let Some(tx) = events {
                    // The receiver may have hung up; the summary is still returned.
                    let _ = tx.send(BuildEvent::ArticleRendered(summary.clone()));
                }
                Ok(summary)
            })
            .collect::<Result<Vec<_>, BuildError>>()
    })?;

    Ok(BuildSummary {
        articles: summaries,
    })
}

fn render_one(
    source: &Path,
    path: &Path,
    article: &Article,
    output: &Path,
    config: &RenderConfig,
) -> Result<ArticleSummary, BuildError> {
    let result = article.render();
    let leftovers = leftover_images(&article.gallery, &result.used_images).len();
    let markup = render_article(article, &result, config);

    let output_name = PathBuf::from(format!("{}.html", article.slug));
    fs::write(output.join(&output_name), markup.into_string())?;
    debug!(slug = %article.slug, nodes = result.document.len(), "rendered article");

    Ok(ArticleSummary {
        source: path.strip_prefix(source).unwrap_or(path).to_path_buf(),
        slug: article.slug.clone(),
        title: article.title.clone(),
        output: output_name,
        nodes: result.document.len(),
        figures: result.figure_count(),
        leftovers,
        unresolved: result.unresolved_images,
    })
}

/// Slugs become file names: they must be unique and a single path component.
fn check_slugs(articles: &[(&Path, Article)]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (path, article) in articles {
        let slug = article.slug.as_str();
        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            return Err(BuildError::InvalidSlug {
                slug: slug.to_string(),
                path: path.to_path_buf(),
            });
        }
        if let Some(first) = seen.insert(slug, *path) {
            return Err(BuildError::DuplicateSlug {
                slug: slug.to_string(),
                first: first.to_path_buf(),
                second: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
