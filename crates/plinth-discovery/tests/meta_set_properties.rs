// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for `PluginMetaSet` set semantics and partitioning.

use std::collections::HashSet;

use plinth_discovery::{PluginMeta, PluginMetaSet};
use proptest::prelude::*;

/// Small alphabets so generated records collide often.
fn arb_meta() -> impl Strategy<Value = PluginMeta> {
    (
        prop::sample::select(vec!["foo", "bar", "baz", ""]),
        prop::sample::select(vec!["1.0.0", "0.0.1", "2.0.0-rc.1", "bananas", "1.0", ""]),
        prop::sample::select(vec!["test-foo", "test-bar", "/opt/plugins/baz"]),
    )
        .prop_map(|(name, version, path)| PluginMeta::new(name, version, path))
}

proptest! {
    #[test]
    fn count_matches_distinct_records(metas in prop::collection::vec(arb_meta(), 0..40)) {
        let mut set = PluginMetaSet::new();
        for m in &metas {
            set.add(m.clone());
        }
        let distinct: HashSet<&PluginMeta> = metas.iter().collect();
        prop_assert_eq!(set.count(), distinct.len());
    }

    #[test]
    fn remove_after_add_drops_exactly_one(
        metas in prop::collection::vec(arb_meta(), 0..20),
        target in arb_meta(),
    ) {
        let mut set: PluginMetaSet = metas.into_iter().collect();
        set.add(target.clone());
        prop_assert!(set.has(&target));

        let before = set.count();
        set.remove(&target);
        prop_assert!(!set.has(&target));
        prop_assert_eq!(set.count(), before - 1);

        set.remove(&target);
        prop_assert_eq!(set.count(), before - 1);
    }

    #[test]
    fn with_name_is_exact_subset(
        metas in prop::collection::vec(arb_meta(), 0..30),
        name in prop::sample::select(vec!["foo", "bar", "baz", "", "missing"]),
    ) {
        let set: PluginMetaSet = metas.into_iter().collect();
        let filtered = set.with_name(name);

        for m in &filtered {
            prop_assert_eq!(m.name.as_str(), name);
            prop_assert!(set.has(m));
        }
        for m in &set {
            if m.name == name {
                prop_assert!(filtered.has(m));
            }
        }
    }

    #[test]
    fn validate_versions_partitions_disjointly(metas in prop::collection::vec(arb_meta(), 0..30)) {
        let set: PluginMetaSet = metas.into_iter().collect();
        let (valid, invalid) = set.validate_versions();

        prop_assert_eq!(valid.count() + invalid.count(), set.count());
        for m in &set {
            prop_assert!(valid.has(m) != invalid.has(m));
            prop_assert_eq!(valid.has(m), m.has_valid_version());
        }
    }
}

#[test]
fn shared_version_and_path_are_distinct_records() {
    let metas = [
        PluginMeta::new("foo", "1.0.0", "test-foo"),
        PluginMeta::new("bar", "2.0.0", "test-bar"),
        PluginMeta::new("baz", "2.0.0", "test-bar"),
    ];
    let mut set = PluginMetaSet::new();
    set.extend(metas.iter().cloned());
    assert_eq!(set.count(), 3);

    for m in &metas {
        set.remove(m);
    }
    assert_eq!(set.count(), 0);
}

#[test]
fn selection_flow_picks_newest_valid_candidate() {
    let set: PluginMetaSet = [
        PluginMeta::new("aws", "1.2.0", "/plugins/aws_v1.2.0"),
        PluginMeta::new("aws", "1.4.1", "/plugins/aws_v1.4.1"),
        PluginMeta::new("aws", "latest", "/plugins/aws_latest"),
        PluginMeta::new("google", "9.0.0", "/plugins/google_v9.0.0"),
    ]
    .into_iter()
    .collect();

    let (valid, invalid) = set.with_name("aws").validate_versions();
    assert_eq!(invalid.count(), 1);

    let chosen = valid.newest().expect("valid candidates exist");
    assert_eq!(chosen.path, std::path::PathBuf::from("/plugins/aws_v1.4.1"));
}
