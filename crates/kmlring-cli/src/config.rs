//! Configuration file support (`.kmlring.toml`)
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.kmlring.toml` (user defaults)
//! - Project directory: `./.kmlring.toml` (project defaults)
//! - Custom location via `--config` (overrides both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments (`--format`, `--order`, etc.)
//! 2. `--config` file
//! 3. Project config (`./.kmlring.toml`)
//! 4. User config (`~/.kmlring.toml`)
//! 5. Built-in defaults
//!
//! ```toml
//! [extract]
//! format = "json"        # text or json
//! order = "lat-lon"      # lon-lat or lat-lon
//! compact = true
//! fail_on_error = false
//! ```

use crate::output::{CoordinateOrder, OutputFormat};
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home and current directories
pub const CONFIG_FILE_NAME: &str = ".kmlring.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings for the extract command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Default output format (text, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default coordinate order (lon-lat, lat-lon)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Default compact JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,

    /// Exit with an error status when any polygon was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_error: Option<bool>,
}

impl ExtractConfig {
    /// Overlay `other` on `self`, field by field
    fn merge(self, other: Self) -> Self {
        Self {
            format: other.format.or(self.format),
            order: other.order.or(self.order),
            compact: other.compact.or(self.compact),
            fail_on_error: other.fail_on_error.or(self.fail_on_error),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // TOML errors include line/column information
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a discovered config file, downgrading failures to warnings
    fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config {}: {e:#}", path.display());
                None
            }
        }
    }

    /// Path of the user config (`~/.kmlring.toml`)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Find and load configuration with full precedence
    ///
    /// A broken user or project config is skipped with a warning; an
    /// explicit config that cannot be loaded is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let user = Self::user_config_path().and_then(|path| Self::load_optional(&path));
        let project = Self::load_optional(Path::new(CONFIG_FILE_NAME));
        let explicit = explicit.map(Self::load_from_file).transpose()?;

        Ok([user, project, explicit]
            .into_iter()
            .flatten()
            .fold(Self::default(), Self::merge))
    }

    /// Overlay `other` on `self`
    pub fn merge(self, other: Self) -> Self {
        let extract = match (self.extract, other.extract) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.or(base),
        };
        Self { extract }
    }

    /// The extract section, or defaults
    pub fn extract(&self) -> ExtractConfig {
        self.extract.clone().unwrap_or_default()
    }
}

/// Resolve output format from CLI, config, or default
pub fn resolve_output_format(
    cli_value: Option<OutputFormat>,
    config_value: Option<&str>,
) -> OutputFormat {
    if let Some(format) = cli_value {
        return format;
    }

    match config_value.map(str::to_lowercase).as_deref() {
        Some("json") => OutputFormat::Json,
        Some("text") | None => OutputFormat::Text,
        Some(other) => {
            warn!("Unknown format '{other}' in config, using text");
            OutputFormat::Text
        }
    }
}

/// Resolve coordinate order from CLI, config, or default
pub fn resolve_order(
    cli_value: Option<CoordinateOrder>,
    config_value: Option<&str>,
) -> CoordinateOrder {
    if let Some(order) = cli_value {
        return order;
    }

    match config_value.map(str::to_lowercase).as_deref() {
        Some("lat-lon" | "latlon") => CoordinateOrder::LatLon,
        Some("lon-lat" | "lonlat") | None => CoordinateOrder::LonLat,
        Some(other) => {
            warn!("Unknown coordinate order '{other}' in config, using lon-lat");
            CoordinateOrder::LonLat
        }
    }
}
