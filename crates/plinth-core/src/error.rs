// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plinth plugin discovery crates.

use std::path::PathBuf;

use thiserror::Error;

/// The error type returned by fallible discovery and configuration operations.
#[derive(Debug, Error)]
pub enum PlinthError {
    /// Configuration errors (invalid TOML, bad values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin record's version string is not a semantic version.
    #[error("plugin `{name}` has invalid version `{version}`: {source}")]
    InvalidVersion {
        name: String,
        version: String,
        source: semver::Error,
    },

    /// A version constraint for a plugin could not be parsed.
    #[error("plugin `{name}` has invalid version constraint `{constraint}`: {source}")]
    InvalidConstraint {
        name: String,
        constraint: String,
        source: semver::Error,
    },

    /// No record was available to choose from.
    #[error("{}", no_candidates_message(.name))]
    NoCandidates { name: Option<String> },

    /// Reading a plugin artifact failed.
    #[error("failed to read plugin artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn no_candidates_message(name: &Option<String>) -> String {
    match name {
        Some(n) => format!("no candidate plugins for `{n}`"),
        None => "no candidate plugins in an empty set".to_string(),
    }
}
