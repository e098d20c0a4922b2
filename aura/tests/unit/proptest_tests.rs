//! Property-based tests using proptest

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use aura::backup;
use aura::registry::EndpointRegistry;
use aura::storage::MemoryStore;
use aura::types::endpoint::Endpoint;
use aura::view::project;

fn empty_registry() -> EndpointRegistry {
    EndpointRegistry::load(Arc::new(MemoryStore::new()))
}

/// URLが重複しない(name, url, is_pinned)の組
fn distinct_entries() -> impl Strategy<Value = Vec<(String, String, bool)>> {
    prop::collection::btree_set("[a-z]{1,8}", 0..12).prop_flat_map(|hosts| {
        let hosts: Vec<String> = hosts.into_iter().collect();
        let len = hosts.len();
        (
            Just(hosts),
            prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}", len),
            prop::collection::vec(any::<bool>(), len),
        )
            .prop_map(|(hosts, names, pins)| {
                hosts
                    .into_iter()
                    .zip(names)
                    .zip(pins)
                    .map(|((host, name), pin)| {
                        (name.trim().to_string(), format!("https://{}.example", host), pin)
                    })
                    .collect()
            })
    })
}

fn endpoints_from(entries: &[(String, String, bool)]) -> Vec<Endpoint> {
    entries
        .iter()
        .map(|(name, url, pin)| Endpoint::new(name.clone(), url.clone()).pinned(*pin))
        .collect()
}

// ---------------------------------------------------------------------------
// EndpointRegistry
// ---------------------------------------------------------------------------

proptest! {
    /// URLが異なるaddは呼び出し順に全件残り、すべて非ピン留め
    #[test]
    fn distinct_adds_are_kept_in_order(entries in distinct_entries()) {
        let mut registry = empty_registry();
        for (name, url, _) in &entries {
            registry.add(name, url).unwrap();
        }
        let urls: Vec<String> = entries.iter().map(|(_, url, _)| url.clone()).collect();
        prop_assert_eq!(registry.urls(), urls);
        prop_assert!(registry.list().iter().all(|e| !e.is_pinned));
    }

    /// 同じURLの2回目のaddは拒否され、最初のエントリが残る
    #[test]
    fn duplicate_add_keeps_first(first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let mut registry = empty_registry();
        registry.add(&first, "https://dup.example").unwrap();
        prop_assert!(registry.add(&second, "https://dup.example").is_err());
        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(&registry.list()[0].name, &first);
    }

    /// removeを2回呼んでも1回と同じ結果
    #[test]
    fn remove_is_idempotent(entries in distinct_entries(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!entries.is_empty());
        let mut once = empty_registry();
        let mut twice = empty_registry();
        for (name, url, _) in &entries {
            once.add(name, url).unwrap();
            twice.add(name, url).unwrap();
        }
        let target = entries[pick.index(entries.len())].1.clone();

        prop_assert!(once.remove(&target).unwrap());
        prop_assert!(twice.remove(&target).unwrap());
        prop_assert!(!twice.remove(&target).unwrap());
        prop_assert_eq!(once.list(), twice.list());
    }

    /// import_mergeは既存エントリを変えず、追加件数は新規URLの数
    #[test]
    fn import_merge_counts_new_urls(
        existing in distinct_entries(),
        incoming in distinct_entries(),
    ) {
        let mut registry = empty_registry();
        registry.import_merge(endpoints_from(&existing)).unwrap();
        let before = registry.list().to_vec();

        let known: BTreeSet<&String> = existing.iter().map(|(_, url, _)| url).collect();
        let expected_new = incoming.iter().filter(|(_, url, _)| !known.contains(url)).count();

        let added = registry.import_merge(endpoints_from(&incoming)).unwrap();
        prop_assert_eq!(added, expected_new);
        prop_assert_eq!(registry.len(), before.len() + expected_new);
        prop_assert_eq!(&registry.list()[..before.len()], &before[..]);
    }
}

// ---------------------------------------------------------------------------
// project / backup
// ---------------------------------------------------------------------------

proptest! {
    /// 空の検索語ではピン留めが先、各グループ内は元の順序
    #[test]
    fn projection_puts_pinned_first_stably(entries in distinct_entries()) {
        let endpoints = endpoints_from(&entries);
        let projected = project(&endpoints, "");

        prop_assert_eq!(projected.len(), endpoints.len());
        let first_unpinned = projected.iter().position(|e| !e.is_pinned).unwrap_or(projected.len());
        prop_assert!(projected[first_unpinned..].iter().all(|e| !e.is_pinned));

        let pinned: Vec<&Endpoint> = endpoints.iter().filter(|e| e.is_pinned).collect();
        let unpinned: Vec<&Endpoint> = endpoints.iter().filter(|e| !e.is_pinned).collect();
        prop_assert_eq!(&projected[..first_unpinned], &pinned[..]);
        prop_assert_eq!(&projected[first_unpinned..], &unpinned[..]);
    }

    /// 検索結果は名前が一致するものだけで、空検索の部分列になる
    #[test]
    fn projection_filter_is_subset(entries in distinct_entries(), term in "[A-Za-z ]{0,3}") {
        let endpoints = endpoints_from(&entries);
        let all = project(&endpoints, "");
        let filtered = project(&endpoints, &term);
        let needle = term.to_lowercase();

        prop_assert!(filtered.iter().all(|e| e.name.to_lowercase().contains(&needle)));
        let expected: Vec<&Endpoint> = all
            .iter()
            .copied()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    /// エクスポートしたものを空のレジストリへインポートすると元に戻る
    #[test]
    fn export_then_import_restores_list(entries in distinct_entries()) {
        let endpoints = endpoints_from(&entries);
        let text = backup::export(&endpoints).unwrap();

        let mut registry = empty_registry();
        let added = registry.import_merge(backup::import(&text).unwrap()).unwrap();
        prop_assert_eq!(added, endpoints.len());
        prop_assert_eq!(registry.list(), &endpoints[..]);
    }
}
