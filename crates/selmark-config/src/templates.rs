//! Configuration templates for `selmark init`.
//!
//! Templates are stored as valid TOML files and handed out with every setting commented, so a
//! fresh config documents the defaults without pinning them.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, merge::ParsedConfig, merge_configs, parse::parse_config};

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config(LOCAL_TEMPLATE);
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let result = parse_config(GLOBAL_TEMPLATE);
        assert!(result.is_ok(), "global template failed to parse: {result:?}");
    }

    #[test]
    fn local_template_matches_defaults() {
        let raw = parse_config(LOCAL_TEMPLATE).unwrap();
        let merged = merge_configs(&[ParsedConfig {
            path: "/tmp/.selmark.toml".into(),
            config: raw,
        }]);
        let defaults = Config::default();
        assert_eq!(merged.highlight, defaults.highlight);
        assert_eq!(merged.navigation, defaults.navigation);
        assert_eq!(merged.trigger, defaults.trigger);
    }

    #[test]
    fn commented_template_has_no_active_settings() {
        let raw = parse_config(&local_template()).unwrap();
        assert!(raw.highlight.is_none());
        assert!(raw.navigation.is_none());
        assert!(raw.trigger.is_none());
    }

    #[test]
    fn comment_template_preserves_comments_and_blank_lines() {
        let input = "# note\n\n[section]\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# note\n\n# [section]\n# key = \"value\"\n"
        );
    }
}
