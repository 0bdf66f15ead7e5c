// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! reported instead of silently ignored.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use plinth_core::PlinthError;
use plinth_discovery::{PluginConstraints, PluginRequirements};
use serde::{Deserialize, Serialize};

/// Top-level Plinth configuration.
///
/// ```toml
/// [discovery]
/// log_level = "info"
///
/// [plugins.aws]
/// version = ">=1.2, <2"
/// path = "/opt/plugins/aws"
/// sha256 = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlinthConfig {
    /// Discovery run settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Per-plugin settings keyed by plugin name.
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginConfig>,
}

/// Settings for the discovery run itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Logging level for the host binary (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for a single plugin.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Semantic version constraint, e.g. `"^1.2"`. Defaults to `"*"`.
    #[serde(default = "default_version")]
    pub version: String,

    /// Use the binary at this path instead of any discovered candidate.
    #[serde(default)]
    pub path: Option<String>,

    /// Hex-encoded SHA-256 digest the selected binary must match.
    #[serde(default)]
    pub sha256: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            path: None,
            sha256: None,
        }
    }
}

fn default_version() -> String {
    "*".to_string()
}

impl PlinthConfig {
    /// Build the plugin requirements described by `[plugins.*]`.
    pub fn requirements(&self) -> Result<PluginRequirements, PlinthError> {
        let mut reqs = PluginRequirements::new();
        for (name, plugin) in &self.plugins {
            let mut constraints = PluginConstraints::parse(name, &plugin.version)?;
            if let Some(digest) = &plugin.sha256 {
                let bytes = hex::decode(digest).map_err(|e| {
                    PlinthError::Config(format!("plugins.{name}.sha256 is not valid hex: {e}"))
                })?;
                constraints.sha256 = Some(bytes);
            }
            reqs.insert(name.clone(), constraints);
        }
        Ok(reqs)
    }

    /// Path overrides from `[plugins.*] path = ...`.
    pub fn path_overrides(&self) -> HashMap<String, PathBuf> {
        self.plugins
            .iter()
            .filter_map(|(name, plugin)| {
                plugin
                    .path
                    .as_ref()
                    .map(|path| (name.clone(), PathBuf::from(path)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_log_level_defaults_to_info() {
        let config: PlinthConfig = toml::from_str("").unwrap();
        assert_eq!(config.discovery.log_level, "info");

        let config: PlinthConfig = toml::from_str("[discovery]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.discovery.log_level, "debug");
    }

    #[test]
    fn discovery_deny_unknown_fields() {
        let toml_str = "[discovery]\nlog_levle = \"debug\"\n";
        assert!(toml::from_str::<PlinthConfig>(toml_str).is_err());
    }

    #[test]
    fn plugin_version_defaults_to_any() {
        let config: PlinthConfig = toml::from_str("[plugins.aws]\n").unwrap();
        assert_eq!(config.plugins["aws"].version, "*");
        assert!(config.plugins["aws"].path.is_none());
    }

    #[test]
    fn requirements_parse_constraints_and_digests() {
        let toml_str = r#"
[plugins.aws]
version = ">=1.2.0, <2.0.0"
sha256 = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"

[plugins.google]
"#;
        let config: PlinthConfig = toml::from_str(toml_str).unwrap();
        let reqs = config.requirements().unwrap();
        assert_eq!(reqs.len(), 2);

        let aws = reqs.get("aws").unwrap();
        assert!(aws.allows_version(&semver::Version::new(1, 3, 0)));
        assert!(!aws.allows_version(&semver::Version::new(2, 0, 0)));
        assert_eq!(aws.sha256.as_ref().map(Vec::len), Some(32));

        assert!(reqs.get("google").unwrap().sha256.is_none());
    }

    #[test]
    fn requirements_reject_bad_constraint() {
        let mut config = PlinthConfig::default();
        config.plugins.insert(
            "aws".to_string(),
            PluginConfig {
                version: "bananas".to_string(),
                ..PluginConfig::default()
            },
        );
        let err = config.requirements().unwrap_err();
        assert!(matches!(err, PlinthError::InvalidConstraint { .. }));
    }

    #[test]
    fn path_overrides_only_include_plugins_with_paths() {
        let toml_str = r#"
[plugins.aws]
path = "/opt/plugins/aws"

[plugins.google]
version = "^3"
"#;
        let config: PlinthConfig = toml::from_str(toml_str).unwrap();
        let overrides = config.path_overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["aws"], PathBuf::from("/opt/plugins/aws"));
    }

    #[test]
    fn plugin_deny_unknown_fields() {
        let toml_str = r#"
[plugins.aws]
verison = "1.0.0"
"#;
        assert!(toml::from_str::<PlinthConfig>(toml_str).is_err());
    }
}
