//! Configuration file parsing.
//!
//! Parses individual `.selmark.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Highlight settings section.
    pub highlight: Option<RawHighlightSettings>,
    /// Navigation settings section.
    pub navigation: Option<RawNavigationSettings>,
    /// Trigger settings section.
    pub trigger: Option<RawTriggerSettings>,
}

/// Raw highlight settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHighlightSettings {
    /// Tag of the marker element.
    pub marker_tag: Option<String>,
    /// Class identifying marker elements.
    pub marker_class: Option<String>,
    /// Class added to the active marker.
    pub active_class: Option<String>,
    /// Excluded element tags. Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude_tags: Option<Vec<String>>,
    /// Minimum selection length that triggers a scan.
    pub min_query_len: Option<usize>,
}

/// Raw navigation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNavigationSettings {
    /// Fraction of the viewport height above the active match after a step.
    pub scroll_fraction: Option<f64>,
    /// Whether step scrolling is animated.
    pub smooth_scroll: Option<bool>,
    /// Whether the initial match is scrolled into view.
    pub scroll_on_initialize: Option<bool>,
}

/// Raw trigger settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTriggerSettings {
    /// Debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
