// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single discovered plugin binary.

use std::fmt;
use std::path::PathBuf;

use plinth_core::PlinthError;
use semver::Version;
use sha2::{Digest, Sha256};

/// Version assigned to records synthesized from explicit path overrides.
pub const VERSION_ZERO: &str = "0.0.0";

/// Metadata for one candidate plugin binary.
///
/// Equality and hashing cover all three fields, so two records that differ
/// only in name are distinct set elements. The version is kept as the raw
/// text found during discovery; it is parsed only when asked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginMeta {
    /// Logical plugin name (e.g., "aws").
    pub name: String,
    /// Declared version string, ideally a semantic version.
    pub version: String,
    /// Location of the plugin artifact.
    pub path: PathBuf,
}

impl PluginMeta {
    /// Create a record. No field is validated.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            path: path.into(),
        }
    }

    /// Parse the declared version as a semantic version.
    pub fn parsed_version(&self) -> Result<Version, PlinthError> {
        Version::parse(&self.version).map_err(|source| PlinthError::InvalidVersion {
            name: self.name.clone(),
            version: self.version.clone(),
            source,
        })
    }

    /// Returns true if the declared version parses as a semantic version.
    pub fn has_valid_version(&self) -> bool {
        Version::parse(&self.version).is_ok()
    }

    /// SHA-256 digest of the artifact at `path`.
    ///
    /// Used to check a candidate against a digest lock in
    /// [`PluginConstraints`](crate::PluginConstraints).
    pub fn sha256(&self) -> Result<Vec<u8>, PlinthError> {
        let bytes = std::fs::read(&self.path).map_err(|source| PlinthError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(Sha256::digest(&bytes).to_vec())
    }
}

impl fmt::Display for PluginMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{} ({})", self.name, self.version, self.path.display())
    }
}
