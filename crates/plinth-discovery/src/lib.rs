// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin metadata set and requirement matching.
//!
//! A discovery pass builds a [`PluginMetaSet`] of candidate plugin binaries,
//! one [`PluginMeta`] per candidate. Selection logic then narrows the set by
//! name, splits out records with malformed versions, applies
//! [`PluginRequirements`], and picks the newest remaining record.

pub mod meta;
pub mod meta_set;
pub mod requirements;

pub use meta::{PluginMeta, VERSION_ZERO};
pub use meta_set::PluginMetaSet;
pub use requirements::{PluginConstraints, PluginRequirements};
