// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks what serde cannot: that version constraints parse, override paths
//! are non-empty, and digests are well-formed.

use crate::diagnostic::ConfigError;
use crate::model::PlinthConfig;

/// Accepted values for `discovery.log_level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Length of a hex-encoded SHA-256 digest.
const SHA256_HEX_LEN: usize = 64;

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &PlinthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.discovery.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "discovery.log_level `{}` must be one of: {}",
                config.discovery.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (name, plugin) in &config.plugins {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "plugin names in [plugins] must not be empty".to_string(),
            });
        }

        if let Err(e) = semver::VersionReq::parse(&plugin.version) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "plugins.{name}.version `{}` is not a valid version constraint: {e}",
                    plugin.version
                ),
            });
        }

        if let Some(path) = &plugin.path {
            if path.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("plugins.{name}.path must not be empty"),
                });
            }
        }

        if let Some(digest) = &plugin.sha256 {
            if digest.len() != SHA256_HEX_LEN || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "plugins.{name}.sha256 must be {SHA256_HEX_LEN} hex characters, got `{digest}`"
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginConfig;

    fn config_with(name: &str, plugin: PluginConfig) -> PlinthConfig {
        let mut config = PlinthConfig::default();
        config.plugins.insert(name.to_string(), plugin);
        config
    }

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PlinthConfig::default()).is_ok());
    }

    #[test]
    fn valid_plugin_passes() {
        let config = config_with(
            "aws",
            PluginConfig {
                version: "~1.2".to_string(),
                path: Some("/opt/plugins/aws".to_string()),
                sha256: Some("ab".repeat(32)),
            },
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_constraint_fails_validation() {
        let config = config_with(
            "aws",
            PluginConfig {
                version: "bananas".to_string(),
                ..PluginConfig::default()
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "plugins.aws.version"));
    }

    #[test]
    fn empty_path_fails_validation() {
        let config = config_with(
            "aws",
            PluginConfig {
                path: Some("  ".to_string()),
                ..PluginConfig::default()
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "plugins.aws.path must not be empty"));
    }

    #[test]
    fn short_digest_fails_validation() {
        let config = config_with(
            "aws",
            PluginConfig {
                sha256: Some("abc".to_string()),
                ..PluginConfig::default()
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "plugins.aws.sha256"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = PlinthConfig::default();
        config.discovery.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "discovery.log_level"));
    }

    #[test]
    fn empty_plugin_name_fails_validation() {
        let config = config_with("", PluginConfig::default());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "plugin names"));
    }

    #[test]
    fn collects_all_errors() {
        let config = config_with(
            "aws",
            PluginConfig {
                version: ">>1".to_string(),
                path: Some(String::new()),
                sha256: Some("zz".repeat(32)),
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
