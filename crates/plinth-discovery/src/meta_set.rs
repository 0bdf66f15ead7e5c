// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Set of discovered plugin records.
//!
//! `PluginMetaSet` stores [`PluginMeta`] values with set semantics keyed by
//! the full record. Queries never modify the source set; filtering and
//! partitioning return fresh, independently owned sets.

use std::collections::hash_set;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use plinth_core::PlinthError;
use semver::Version;

use crate::meta::{PluginMeta, VERSION_ZERO};
use crate::requirements::PluginRequirements;

/// Unordered collection of unique plugin records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMetaSet {
    metas: HashSet<PluginMeta>,
}

impl PluginMetaSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            metas: HashSet::new(),
        }
    }

    /// Insert `meta`. Adding a record that is already present is a no-op.
    pub fn add(&mut self, meta: PluginMeta) {
        if self.metas.contains(&meta) {
            tracing::debug!(plugin = %meta, "plugin already in set");
            return;
        }
        self.metas.insert(meta);
    }

    /// Remove the record equal to `meta`, if present.
    pub fn remove(&mut self, meta: &PluginMeta) {
        if !self.metas.remove(meta) {
            tracing::debug!(plugin = %meta, "plugin not in set, nothing to remove");
        }
    }

    /// Returns true if a record equal to `meta` is present.
    pub fn has(&self, meta: &PluginMeta) -> bool {
        self.metas.contains(meta)
    }

    /// Number of distinct records.
    pub fn count(&self) -> usize {
        self.metas.len()
    }

    /// Returns true if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Iterate over the records in arbitrary order.
    pub fn iter(&self) -> hash_set::Iter<'_, PluginMeta> {
        self.metas.iter()
    }

    /// New set with exactly the records named `name`.
    pub fn with_name(&self, name: &str) -> PluginMetaSet {
        self.iter().filter(|m| m.name == name).cloned().collect()
    }

    /// Split the set by whether each record's version is a semantic version.
    ///
    /// Returns `(valid, invalid)`. Every record lands in exactly one of the
    /// two sets.
    pub fn validate_versions(&self) -> (PluginMetaSet, PluginMetaSet) {
        let mut valid = PluginMetaSet::new();
        let mut invalid = PluginMetaSet::new();
        for meta in &self.metas {
            match Version::parse(&meta.version) {
                Ok(_) => valid.add(meta.clone()),
                Err(e) => {
                    tracing::debug!(plugin = %meta, error = %e, "plugin has invalid version");
                    invalid.add(meta.clone());
                }
            }
        }
        (valid, invalid)
    }

    /// Group the records by name.
    pub fn by_name(&self) -> HashMap<String, PluginMetaSet> {
        let mut groups: HashMap<String, PluginMetaSet> = HashMap::new();
        for meta in &self.metas {
            groups.entry(meta.name.clone()).or_default().add(meta.clone());
        }
        groups
    }

    /// The record with the highest semantic version.
    ///
    /// Every version must parse; run [`validate_versions`](Self::validate_versions)
    /// first to drop malformed records. Records with equal versions are
    /// ordered by name, then path, and the greatest wins.
    pub fn newest(&self) -> Result<&PluginMeta, PlinthError> {
        let mut best: Option<(Version, &PluginMeta)> = None;
        for meta in &self.metas {
            let version = meta.parsed_version()?;
            let replace = match &best {
                None => true,
                Some((best_version, best_meta)) => {
                    (&version, &meta.name, &meta.path)
                        > (best_version, &best_meta.name, &best_meta.path)
                }
            };
            if replace {
                best = Some((version, meta));
            }
        }
        best.map(|(_, meta)| meta)
            .ok_or(PlinthError::NoCandidates { name: None })
    }

    /// Narrow the set to records allowed by `reqs`, grouped by name.
    ///
    /// Every required name that appears in the set gets an entry, empty if
    /// none of its records satisfy the constraints. Records for names not in
    /// `reqs` and records with unparseable versions are left out.
    pub fn constrain_versions(&self, reqs: &PluginRequirements) -> HashMap<String, PluginMetaSet> {
        let mut out: HashMap<String, PluginMetaSet> = HashMap::new();
        for meta in &self.metas {
            let Some(constraints) = reqs.get(&meta.name) else {
                continue;
            };
            let allowed = out.entry(meta.name.clone()).or_default();
            let Ok(version) = Version::parse(&meta.version) else {
                continue;
            };
            if constraints.allows_version(&version) {
                allowed.add(meta.clone());
            }
        }
        out
    }

    /// New set in which each plugin named in `paths` is replaced by a single
    /// record pointing at the given path.
    ///
    /// Override records carry version [`VERSION_ZERO`] since nothing is
    /// known about the binary at that path.
    pub fn override_paths(&self, paths: &HashMap<String, PathBuf>) -> PluginMetaSet {
        let mut out = PluginMetaSet::new();
        for meta in &self.metas {
            if paths.contains_key(&meta.name) {
                tracing::warn!(plugin = %meta, "discovered plugin replaced by path override");
                continue;
            }
            out.add(meta.clone());
        }
        for (name, path) in paths {
            out.add(PluginMeta::new(name.clone(), VERSION_ZERO, path.clone()));
        }
        out
    }
}

impl FromIterator<PluginMeta> for PluginMetaSet {
    fn from_iter<I: IntoIterator<Item = PluginMeta>>(iter: I) -> Self {
        Self {
            metas: iter.into_iter().collect(),
        }
    }
}

impl Extend<PluginMeta> for PluginMetaSet {
    fn extend<I: IntoIterator<Item = PluginMeta>>(&mut self, iter: I) {
        for meta in iter {
            self.add(meta);
        }
    }
}

impl IntoIterator for PluginMetaSet {
    type Item = PluginMeta;
    type IntoIter = hash_set::IntoIter<PluginMeta>;

    fn into_iter(self) -> Self::IntoIter {
        self.metas.into_iter()
    }
}

impl<'a> IntoIterator for &'a PluginMetaSet {
    type Item = &'a PluginMeta;
    type IntoIter = hash_set::Iter<'a, PluginMeta>;

    fn into_iter(self) -> Self::IntoIter {
        self.metas.iter()
    }
}
