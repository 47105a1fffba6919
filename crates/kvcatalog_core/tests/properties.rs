//! Property tests for sequencing, round-trips and search.

use kvcatalog_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ids_strictly_increase(drafts in drafts_strategy(20)) {
        let store = memory_store();
        let mut last = 0u64;
        for draft in drafts {
            let id = store.create(draft).unwrap().id.get();
            prop_assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn read_after_create_round_trips(draft in draft_strategy()) {
        let store = memory_store();
        let created = store.create(draft.clone()).unwrap();
        let read = store.read(created.id).unwrap();
        prop_assert_eq!(read.to_draft(), draft);
        prop_assert_eq!(read, created);
    }

    #[test]
    fn list_is_sorted_and_complete(drafts in drafts_strategy(15)) {
        let store = memory_store();
        let expected = drafts.len();
        for draft in drafts {
            store.create(draft).unwrap();
        }

        let all = store.list_all().unwrap();
        prop_assert_eq!(all.len(), expected);
        prop_assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn blank_search_is_list(drafts in drafts_strategy(8), term in blank_term_strategy()) {
        let store = memory_store();
        for draft in drafts {
            store.create(draft).unwrap();
        }
        prop_assert_eq!(store.search(&term).unwrap(), store.list_all().unwrap());
    }

    #[test]
    fn search_results_match_term(drafts in drafts_strategy(10), term in search_term_strategy()) {
        let store = memory_store();
        for draft in drafts {
            store.create(draft).unwrap();
        }

        let needle = term.trim().to_lowercase();
        let all = store.list_all().unwrap();
        let hits = store.search(&term).unwrap();

        let expected: Vec<_> = all
            .into_iter()
            .filter(|r| {
                needle.is_empty()
                    || r.title.to_lowercase().contains(&needle)
                    || r.author.to_lowercase().contains(&needle)
                    || r.genre.to_lowercase().contains(&needle)
            })
            .collect();
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn deleted_records_stay_gone(
        drafts in drafts_strategy(10),
        pick in any::<prop::sample::Index>()
    ) {
        prop_assume!(!drafts.is_empty());
        let store = memory_store();
        let created: Vec<_> = drafts
            .into_iter()
            .map(|draft| store.create(draft).unwrap())
            .collect();

        let victim = pick.get(&created).id;
        store.delete(victim).unwrap();

        prop_assert!(store.read(victim).unwrap_err().is_not_found());
        prop_assert!(store.delete(victim).unwrap_err().is_not_found());
        prop_assert!(store.list_all().unwrap().iter().all(|r| r.id != victim));

        let next = store.create(created[0].to_draft()).unwrap();
        prop_assert!(created.iter().all(|r| r.id < next.id));
    }
}
