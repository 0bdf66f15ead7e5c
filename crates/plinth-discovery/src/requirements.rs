// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin requirements a selected plugin must satisfy.
//!
//! A requirement pairs a semantic version constraint with an optional
//! SHA-256 digest lock. Requirements gathered from several sources are
//! combined with [`PluginRequirements::merge`], which intersects the
//! constraints of plugins named by both sides.

use std::collections::HashMap;

use plinth_core::PlinthError;
use semver::{Version, VersionReq};

/// Constraints on a single plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConstraints {
    /// Allowed versions. `VersionReq::STAR` allows every release version.
    pub versions: VersionReq,
    /// Expected SHA-256 digest of the plugin artifact, if locked.
    pub sha256: Option<Vec<u8>>,
}

impl PluginConstraints {
    /// Constraints allowing any version, with no digest lock.
    pub fn any() -> Self {
        Self {
            versions: VersionReq::STAR,
            sha256: None,
        }
    }

    /// Parse a constraint string such as `">=1.2, <2"` for plugin `name`.
    pub fn parse(name: &str, constraint: &str) -> Result<Self, PlinthError> {
        let versions =
            VersionReq::parse(constraint).map_err(|source| PlinthError::InvalidConstraint {
                name: name.to_string(),
                constraint: constraint.to_string(),
                source,
            })?;
        Ok(Self {
            versions,
            sha256: None,
        })
    }

    /// Returns true if `version` satisfies the version constraint.
    pub fn allows_version(&self, version: &Version) -> bool {
        self.versions.matches(version)
    }

    /// Returns true if no digest is locked or `digest` equals the lock.
    pub fn accepts_sha256(&self, digest: &[u8]) -> bool {
        match &self.sha256 {
            Some(locked) => locked.as_slice() == digest,
            None => true,
        }
    }

    /// Intersect with `other`.
    ///
    /// The result allows only versions both sides allow. The digest lock of
    /// `self` wins when both are set.
    pub fn merge(&self, other: &PluginConstraints) -> PluginConstraints {
        let mut comparators = self.versions.comparators.clone();
        for comparator in &other.versions.comparators {
            if !comparators.contains(comparator) {
                comparators.push(comparator.clone());
            }
        }
        PluginConstraints {
            versions: VersionReq { comparators },
            sha256: self.sha256.clone().or_else(|| other.sha256.clone()),
        }
    }
}

impl Default for PluginConstraints {
    fn default() -> Self {
        Self::any()
    }
}

/// Constraints keyed by plugin name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRequirements {
    entries: HashMap<String, PluginConstraints>,
}

impl PluginRequirements {
    /// Create empty requirements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constraints for `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, constraints: PluginConstraints) {
        self.entries.insert(name.into(), constraints);
    }

    /// Constraints for `name`, if it is required.
    pub fn get(&self, name: &str) -> Option<&PluginConstraints> {
        self.entries.get(name)
    }

    /// Returns true if `name` is required.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of required plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are required.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, constraints)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PluginConstraints)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Union of both requirement sets.
    ///
    /// Plugins named on both sides get the intersection of their constraints.
    pub fn merge(&self, other: &PluginRequirements) -> PluginRequirements {
        let mut entries = self.entries.clone();
        for (name, theirs) in &other.entries {
            let merged = match entries.get(name) {
                Some(ours) => ours.merge(theirs),
                None => theirs.clone(),
            };
            entries.insert(name.clone(), merged);
        }
        PluginRequirements { entries }
    }

    /// Lock each required plugin to the digest given for it in `digests`.
    ///
    /// Digests for plugins that are not required are ignored.
    pub fn lock_executables(&mut self, digests: &HashMap<String, Vec<u8>>) {
        for (name, digest) in digests {
            if let Some(constraints) = self.entries.get_mut(name) {
                constraints.sha256 = Some(digest.clone());
            } else {
                tracing::debug!(plugin = %name, "ignoring digest for plugin that is not required");
            }
        }
    }
}

impl FromIterator<(String, PluginConstraints)> for PluginRequirements {
    fn from_iter<I: IntoIterator<Item = (String, PluginConstraints)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
