//! Configuration system for selmark.
//!
//! selmark uses TOML configuration files named `.selmark.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.selmark.toml` files found, then loading `~/.selmark.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawHighlightSettings, RawNavigationSettings, RawTriggerSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Class attached to every marker node inserted by a scan.
pub const DEFAULT_MARKER_CLASS: &str = "__selection_highlighter_match__";

/// Class attached to the single active marker node.
pub const DEFAULT_ACTIVE_CLASS: &str = "__selection_highlighter_match_active__";

/// Top-level merged configuration for selmark.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.selmark.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Match marking settings.
    pub highlight: HighlightSettings,
    /// Cursor and scrolling settings.
    pub navigation: NavigationSettings,
    /// Selection trigger settings.
    pub trigger: TriggerSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.selmark.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.selmark.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            highlight: &self.highlight,
            navigation: &self.navigation,
            trigger: &self.trigger,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Settings controlling how matches are marked in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Tag of the element wrapped around each match.
    pub marker_tag: String,
    /// Class identifying marker elements.
    pub marker_class: String,
    /// Class added to the active marker.
    pub active_class: String,
    /// Element tags whose subtrees are never scanned.
    pub exclude_tags: Vec<String>,
    /// Selections shorter than this (in characters, after trimming) clear instead of scanning.
    pub min_query_len: usize,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            marker_tag: String::from("span"),
            marker_class: String::from(DEFAULT_MARKER_CLASS),
            active_class: String::from(DEFAULT_ACTIVE_CLASS),
            exclude_tags: vec!["script".into(), "style".into(), "noscript".into()],
            min_query_len: 2,
        }
    }
}

impl HighlightSettings {
    /// Returns true if `tag` names an excluded element (case-insensitive).
    pub fn is_excluded_tag(&self, tag: &str) -> bool {
        self.exclude_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Settings for stepping between matches.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Fraction of the viewport height above the active match after a step.
    pub scroll_fraction: f64,
    /// Whether step scrolling is animated.
    pub smooth_scroll: bool,
    /// Whether the initially selected match is scrolled into view.
    pub scroll_on_initialize: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            scroll_fraction: 0.3,
            smooth_scroll: true,
            scroll_on_initialize: false,
        }
    }
}

/// Settings for the selection trigger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TriggerSettings {
    /// Quiet period after the last selection change before a scan runs.
    pub debounce_ms: u64,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

impl TriggerSettings {
    /// Returns the debounce interval as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Match marking settings.
    highlight: &'a HighlightSettings,
    /// Cursor and scrolling settings.
    navigation: &'a NavigationSettings,
    /// Selection trigger settings.
    trigger: &'a TriggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_defaults() {
        let highlight = HighlightSettings::default();
        assert_eq!(highlight.marker_tag, "span");
        assert_eq!(highlight.marker_class, DEFAULT_MARKER_CLASS);
        assert_eq!(highlight.active_class, DEFAULT_ACTIVE_CLASS);
        assert_eq!(highlight.exclude_tags, vec!["script", "style", "noscript"]);
        assert_eq!(highlight.min_query_len, 2);
    }

    #[test]
    fn test_navigation_defaults() {
        let navigation = NavigationSettings::default();
        assert!((navigation.scroll_fraction - 0.3).abs() < f64::EPSILON);
        assert!(navigation.smooth_scroll);
        assert!(!navigation.scroll_on_initialize);
    }

    #[test]
    fn test_trigger_defaults() {
        let trigger = TriggerSettings::default();
        assert_eq!(trigger.debounce_ms, 150);
        assert_eq!(trigger.debounce(), Duration::from_millis(150));
    }

    #[test]
    fn test_excluded_tag_is_case_insensitive() {
        let highlight = HighlightSettings::default();
        assert!(highlight.is_excluded_tag("SCRIPT"));
        assert!(highlight.is_excluded_tag("style"));
        assert!(!highlight.is_excluded_tag("p"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.config_root.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml();

        assert!(toml.contains("[highlight]"));
        assert!(toml.contains("[navigation]"));
        assert!(toml.contains("[trigger]"));
        assert!(toml.contains("debounce_ms = 150"));
        assert!(toml.contains("marker_tag = \"span\""));

        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert!(parsed.get("highlight").is_some());
        assert!(parsed.get("navigation").is_some());
        assert!(parsed.get("trigger").is_some());
    }
}
