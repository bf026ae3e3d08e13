//! Property-based tests for the query pipeline using proptest.

use proptest::prelude::*;
use skimmer::{Dir, Field, RegexSelector, Scraper};

// ============================================================================
// Test helpers
// ============================================================================

/// Builds one line per key: `"k:<key> i:<serial>"`, serial = position.
fn content_from_keys(keys: &[u8]) -> String {
    keys.iter()
        .enumerate()
        .map(|(i, k)| format!("k:{k} i:{i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn keyed_scraper(keys: &[u8]) -> Scraper {
    let mut scraper = Scraper::new();
    scraper
        .add_content(content_from_keys(keys))
        .with(Box::new(RegexSelector::new(
            r"k:(\d+) i:(\d+)",
            vec![Field::new("k", 1), Field::new("i", 2)],
        )));
    scraper
}

fn field_as_number(record: &skimmer::Record, name: &str) -> i64 {
    record
        .get(name)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .expect("field should be a numeric string")
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Sorting is stable: ties keep their merged-sequence order.
    #[test]
    fn sort_is_stable(keys in prop::collection::vec(0u8..3, 1..40)) {
        let mut scraper = keyed_scraper(&keys);
        let records = scraper.order_by("k", Dir::Asc).get().unwrap();

        prop_assert_eq!(records.len(), keys.len());

        // Keys must be non-decreasing, and within equal keys the
        // serial (insertion order) must be increasing.
        for pair in records.windows(2) {
            let (ka, kb) = (field_as_number(&pair[0], "k"), field_as_number(&pair[1], "k"));
            prop_assert!(ka <= kb);
            if ka == kb {
                let (ia, ib) = (field_as_number(&pair[0], "i"), field_as_number(&pair[1], "i"));
                prop_assert!(ia < ib);
            }
        }
    }

    /// skip/take slice the merged sequence exactly.
    #[test]
    fn skip_take_bounds(
        keys in prop::collection::vec(0u8..10, 1..40),
        skip in 0usize..50,
        take in 0usize..50,
    ) {
        let mut scraper = keyed_scraper(&keys);
        let records = scraper.skip(skip).take(take).get().unwrap();

        let expected = keys.len().saturating_sub(skip).min(take);
        prop_assert_eq!(records.len(), expected);

        // The slice starts at the skip-th merged record.
        if let Some(first) = records.first() {
            prop_assert_eq!(field_as_number(first, "i"), skip as i64);
        }
    }

    /// Re-running the same query on the same content yields the same
    /// results.
    #[test]
    fn requery_is_deterministic(
        keys in prop::collection::vec(0u8..5, 1..30),
        skip in 0usize..10,
    ) {
        let mut scraper = keyed_scraper(&keys);

        let first = scraper.order_by("k", Dir::Desc).skip(skip).get().unwrap();
        let second = scraper.order_by("k", Dir::Desc).skip(skip).get().unwrap();

        prop_assert_eq!(first, second);
    }

    /// Merging preserves (content-unit order, within-unit order), no
    /// matter how matches are split across units.
    #[test]
    fn merge_order_is_content_then_match_order(
        a in prop::collection::vec(0u8..10, 0..10),
        b in prop::collection::vec(0u8..10, 0..10),
    ) {
        prop_assume!(!a.is_empty() || !b.is_empty());

        let all: Vec<u8> = a.iter().chain(b.iter()).copied().collect();

        let mut scraper = Scraper::new();
        scraper
            .add_content(a.iter().map(|k| format!("k:{k} i:0")).collect::<Vec<_>>().join("\n"))
            .add_content(b.iter().map(|k| format!("k:{k} i:0")).collect::<Vec<_>>().join("\n"))
            .with(Box::new(RegexSelector::new(
                r"k:(\d+) i:(\d+)",
                vec![Field::new("k", 1), Field::new("i", 2)],
            )));

        let records = scraper.get().unwrap();
        let merged: Vec<i64> = records.iter().map(|r| field_as_number(r, "k")).collect();
        let expected: Vec<i64> = all.iter().map(|k| *k as i64).collect();
        prop_assert_eq!(merged, expected);
    }

    /// reverse() is exactly a reversal of the final sequence.
    #[test]
    fn reverse_mirrors_the_result(keys in prop::collection::vec(0u8..10, 1..30)) {
        let mut scraper = keyed_scraper(&keys);

        let forward = scraper.order_by("k", Dir::Asc).get().unwrap();
        let mut backward = scraper.order_by("k", Dir::Asc).reverse().get().unwrap();

        backward.reverse();
        prop_assert_eq!(forward, backward);
    }
}
