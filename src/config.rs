//! Render configuration.
//!
//! The engine itself takes no configuration: the document it produces depends
//! only on content and gallery. Everything configurable here is presentation
//! copy used by the HTML renderer, plus the worker count for batch builds.
//!
//! ## Config File Location
//!
//! `config.toml` in the config directory (`--config-dir`, default `.`). A
//! missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [figures]
//! courtesy_label = "Courtesy:"   # Label before the attribution line
//! missing_courtesy = "—"         # Shown when a caption yields no courtesy text
//! default_alt = "Article image"  # Alt text for inline images without one
//!
//! [more_photos]
//! heading = "More photos"        # Heading of the leftover-images section
//! alt_prefix = "Photo"           # Leftover alt fallback: "Photo 3"
//!
//! [body]
//! empty_message = "No content yet."
//!
//! [processing]
//! max_processes = 4              # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override only what you need. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Render configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Inline and leftover figure copy.
    pub figures: FiguresConfig,
    /// The trailing section listing unreferenced gallery images.
    pub more_photos: MorePhotosConfig,
    /// Article body copy.
    pub body: BodyConfig,
    /// Parallel rendering settings for `build`.
    pub processing: ProcessingConfig,
}

impl RenderConfig {
    /// Reject copy that would render as an invisible or broken element.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("figures.courtesy_label", &self.figures.courtesy_label),
            ("figures.missing_courtesy", &self.figures.missing_courtesy),
            ("more_photos.heading", &self.more_photos.heading),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiguresConfig {
    pub courtesy_label: String,
    /// The courtesy line is always shown; this stands in for empty courtesy text.
    pub missing_courtesy: String,
    pub default_alt: String,
}

impl Default for FiguresConfig {
    fn default() -> Self {
        Self {
            courtesy_label: "Courtesy:".to_string(),
            missing_courtesy: "—".to_string(),
            default_alt: "Article image".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorePhotosConfig {
    pub heading: String,
    /// Alt fallback for leftovers is `"{alt_prefix} {position}"`.
    pub alt_prefix: String,
}

impl Default for MorePhotosConfig {
    fn default() -> Self {
        Self {
            heading: "More photos".to_string(),
            alt_prefix: "Photo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    /// Rendered in place of the body when the document has no nodes.
    pub empty_message: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            empty_message: "No content yet.".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of articles rendered at once.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map_or(cores, |n| n.min(cores))
}

/// Load `config.toml` from `dir`, falling back to stock defaults when absent.
///
/// Returns `Err` if the file exists but is unreadable, is not valid TOML,
/// contains unknown keys, or fails validation.
pub fn load_config(dir: &Path) -> Result<RenderConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(RenderConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    parse_config(&content)
}

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<RenderConfig, ConfigError> {
    let config: RenderConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# article-render configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image figures (inline and "more photos")
# ---------------------------------------------------------------------------
[figures]
# Label shown before every image's attribution line.
courtesy_label = "Courtesy:"

# Shown after the label when the image caption yields no courtesy text.
# The courtesy line is never omitted.
missing_courtesy = "—"

# Alt text for inline images whose gallery entry has none.
default_alt = "Article image"

# ---------------------------------------------------------------------------
# Leftover images (gallery images never placed with [[img:N]])
# ---------------------------------------------------------------------------
[more_photos]
# Section heading. The section is skipped when every image was placed.
heading = "More photos"

# Alt text fallback for leftovers: "<alt_prefix> <gallery position>".
alt_prefix = "Photo"

# ---------------------------------------------------------------------------
# Article body
# ---------------------------------------------------------------------------
[body]
# Shown instead of the body when the article has no renderable content.
empty_message = "No content yet."

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum articles rendered in parallel by `build`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
