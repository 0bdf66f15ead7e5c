// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plinth.toml` > `~/.config/plinth/plinth.toml` > `/etc/plinth/plinth.toml`
//! with environment variable overrides via `PLINTH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlinthConfig;

/// Fields of a `[plugins.<name>]` table that can be set from the environment.
const PLUGIN_ENV_FIELDS: &[&str] = &["version", "path", "sha256"];

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/plinth/plinth.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "plinth.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("plinth/plinth.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plinth/plinth.toml`
/// 3. `~/.config/plinth/plinth.toml`
/// 4. `./plinth.toml`
/// 5. `PLINTH_*` environment variables
pub fn load_config() -> Result<PlinthConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlinthConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlinthConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlinthConfig, figment::Error> {
    tracing::debug!(path = %path.display(), "loading plinth configuration");
    Figment::new()
        .merge(Serialized::defaults(PlinthConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlinthConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `PLINTH_DISCOVERY_<FIELD>` to
/// `discovery.<field>` and `PLINTH_PLUGINS_<NAME>_<FIELD>` to
/// `plugins.<name>.<field>`.
///
/// Plugin names may contain underscores, so only the trailing field name is
/// split off. `PLINTH_PLUGINS_MY_TOOL_VERSION` maps to `plugins.my_tool.version`.
fn env_provider() -> Env {
    Env::prefixed("PLINTH_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    if let Some(field) = key.strip_prefix("discovery_") {
        return format!("discovery.{field}");
    }
    let Some(rest) = key.strip_prefix("plugins_") else {
        return key;
    };
    for field in PLUGIN_ENV_FIELDS {
        if let Some(name) = rest
            .strip_suffix(field)
            .and_then(|r| r.strip_suffix('_'))
            .filter(|name| !name.is_empty())
        {
            return format!("plugins.{name}.{field}");
        }
    }
    key
}
