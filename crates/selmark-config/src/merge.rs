//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, HighlightSettings, NavigationSettings, TriggerSettings,
    parse::{RawConfig, RawHighlightSettings, RawNavigationSettings, RawTriggerSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every field the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config {
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|p| p.to_path_buf()),
        ..Config::default()
    };

    // Lowest precedence first so closer configs overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(highlight) = &raw.highlight {
            apply_highlight(&mut config.highlight, highlight);
        }
        if let Some(navigation) = &raw.navigation {
            apply_navigation(&mut config.navigation, navigation);
        }
        if let Some(trigger) = &raw.trigger {
            apply_trigger(&mut config.trigger, trigger);
        }
    }

    config
}

/// Applies raw highlight settings, overwriting any present values.
fn apply_highlight(result: &mut HighlightSettings, raw: &RawHighlightSettings) {
    if let Some(v) = &raw.marker_tag {
        result.marker_tag = v.clone();
    }
    if let Some(v) = &raw.marker_class {
        result.marker_class = v.clone();
    }
    if let Some(v) = &raw.active_class {
        result.active_class = v.clone();
    }
    if let Some(v) = &raw.exclude_tags {
        result.exclude_tags = v.clone();
    }
    if let Some(v) = raw.min_query_len {
        result.min_query_len = v;
    }
}

/// Applies raw navigation settings.
fn apply_navigation(result: &mut NavigationSettings, raw: &RawNavigationSettings) {
    if let Some(v) = raw.scroll_fraction {
        result.scroll_fraction = v;
    }
    if let Some(v) = raw.smooth_scroll {
        result.smooth_scroll = v;
    }
    if let Some(v) = raw.scroll_on_initialize {
        result.scroll_on_initialize = v;
    }
}

/// Applies raw trigger settings.
fn apply_trigger(result: &mut TriggerSettings, raw: &RawTriggerSettings) {
    if let Some(v) = raw.debounce_ms {
        result.debounce_ms = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_is_default() {
        let config = merge_configs(&[]);
        assert!(config.config_root.is_none());
        assert_eq!(config.highlight, HighlightSettings::default());
    }

    #[test]
    fn test_closest_config_wins() {
        let configs = vec![
            parsed("/project/.selmark.toml", "[trigger]\ndebounce_ms = 50\n"),
            parsed(
                "/home/user/.selmark.toml",
                "[trigger]\ndebounce_ms = 500\n[navigation]\nscroll_fraction = 0.5\n",
            ),
        ];

        let config = merge_configs(&configs);

        assert_eq!(config.trigger.debounce_ms, 50);
        assert!((config.navigation.scroll_fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_exclude_tags_replace_rather_than_extend() {
        let configs = vec![parsed(
            "/project/.selmark.toml",
            "[highlight]\nexclude_tags = [\"pre\"]\n",
        )];

        let config = merge_configs(&configs);

        assert_eq!(config.highlight.exclude_tags, vec!["pre"]);
        assert_eq!(config.highlight.marker_tag, "span");
    }
}
