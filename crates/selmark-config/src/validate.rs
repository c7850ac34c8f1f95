//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that would make the
//! highlighter misbehave without being outright unparseable.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The scroll fraction falls outside `0.0..=1.0`.
    ScrollFractionOutOfRange {
        /// The configured value.
        value: f64,
    },
    /// A minimum query length of zero lets single-character selections trigger scans.
    MinQueryLenZero,
    /// Marker and active classes are identical, so the active match cannot be told apart.
    ActiveClassMatchesMarker {
        /// The shared class name.
        class: String,
    },
    /// A marker class or tag is empty.
    EmptyMarkerName {
        /// Which setting is empty.
        setting: &'static str,
    },
    /// A zero debounce scans on every selection change.
    DebounceDisabled,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrollFractionOutOfRange { value } => {
                write!(f, "navigation.scroll_fraction {value} is outside 0.0..=1.0")
            }
            Self::MinQueryLenZero => write!(f, "highlight.min_query_len is 0"),
            Self::ActiveClassMatchesMarker { class } => write!(
                f,
                "highlight.active_class and highlight.marker_class are both '{class}'"
            ),
            Self::EmptyMarkerName { setting } => write!(f, "highlight.{setting} is empty"),
            Self::DebounceDisabled => {
                write!(f, "trigger.debounce_ms is 0; every selection change scans")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let highlight = &config.highlight;

    for (setting, value) in [
        ("marker_tag", &highlight.marker_tag),
        ("marker_class", &highlight.marker_class),
        ("active_class", &highlight.active_class),
    ] {
        if value.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyMarkerName { setting });
        }
    }

    if !highlight.marker_class.is_empty() && highlight.marker_class == highlight.active_class {
        warnings.push(ConfigWarning::ActiveClassMatchesMarker {
            class: highlight.marker_class.clone(),
        });
    }

    if highlight.min_query_len == 0 {
        warnings.push(ConfigWarning::MinQueryLenZero);
    }

    let fraction = config.navigation.scroll_fraction;
    if !(0.0..=1.0).contains(&fraction) {
        warnings.push(ConfigWarning::ScrollFractionOutOfRange { value: fraction });
    }

    if config.trigger.debounce_ms == 0 {
        warnings.push(ConfigWarning::DebounceDisabled);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_scroll_fraction_out_of_range() {
        let mut config = Config::default();
        config.navigation.scroll_fraction = 1.5;
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::ScrollFractionOutOfRange { value: 1.5 }]
        );
    }

    #[test]
    fn test_class_collision_and_empty_tag() {
        let mut config = Config::default();
        config.highlight.active_class = config.highlight.marker_class.clone();
        config.highlight.marker_tag = String::new();

        let warnings = validate_config(&config);

        assert!(warnings.contains(&ConfigWarning::EmptyMarkerName {
            setting: "marker_tag"
        }));
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::ActiveClassMatchesMarker { .. }))
        );
    }

    #[test]
    fn test_zero_values() {
        let mut config = Config::default();
        config.highlight.min_query_len = 0;
        config.trigger.debounce_ms = 0;

        let warnings = validate_config(&config);

        assert!(warnings.contains(&ConfigWarning::MinQueryLenZero));
        assert!(warnings.contains(&ConfigWarning::DebounceDisabled));
        assert_eq!(
            ConfigWarning::DebounceDisabled.to_string(),
            "trigger.debounce_ms is 0; every selection change scans"
        );
    }
}
