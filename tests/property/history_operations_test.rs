//! Property-based tests for History Manager operations.
//!
//! These tests verify that the history list stays bounded, keeps the newest
//! entry first and hands out unique ids, for arbitrary sequences of queries.

use pantrychef::database::MemoryStore;
use pantrychef::managers::history_manager::{HistoryManager, HistoryManagerTrait, MAX_HISTORY};
use pantrychef::types::recipe::RecipeRecord;
use proptest::prelude::*;

fn arb_query() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(, [a-z]{1,8}){0,3}"
}

fn arb_diet() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("vegan".to_string()),
        Just("keto".to_string()),
        Just("gluten free".to_string()),
    ])
}

// **History stays bounded and newest-first**
//
// *For any* sequence of appends, the stored list holds
// min(appends, MAX_HISTORY) entries, the most recent query first, with
// strictly decreasing ids.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn history_is_bounded_and_newest_first(
        queries in proptest::collection::vec((arb_query(), arb_diet()), 1..30),
    ) {
        let store = MemoryStore::new();
        let mut manager = HistoryManager::new(&store);

        for (query, diet) in &queries {
            manager
                .append(query, diet.as_deref(), vec![RecipeRecord::new(query, "")])
                .expect("append should succeed");
        }

        let entries = manager.load();
        prop_assert_eq!(entries.len(), queries.len().min(MAX_HISTORY));

        let (last_query, last_diet) = queries.last().unwrap();
        prop_assert_eq!(&entries[0].query, last_query);
        prop_assert_eq!(&entries[0].diet, last_diet);

        for pair in entries.windows(2) {
            prop_assert!(pair[0].id > pair[1].id, "ids must strictly decrease");
        }

        let expected: Vec<&String> = queries.iter().rev().take(MAX_HISTORY).map(|(q, _)| q).collect();
        let actual: Vec<&String> = entries.iter().map(|e| &e.query).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn every_retained_entry_is_findable(
        queries in proptest::collection::vec(arb_query(), 1..20),
    ) {
        let store = MemoryStore::new();
        let mut manager = HistoryManager::new(&store);
        for query in &queries {
            manager.append(query, None, Vec::new()).expect("append should succeed");
        }

        for entry in manager.load() {
            let found = manager.find(entry.id).expect("retained entry must be findable");
            prop_assert_eq!(found, entry);
        }
    }
}
