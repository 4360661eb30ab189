//! Determinism and consistency tests
//!
//! Validates that query evaluation is deterministic and that the
//! sequential and parallel paths produce identical rankings.

use proptest::prelude::*;
use quarry::{DocumentStatus, SearchIndex, RELEVANCE_EPSILON};

// ============================================================================
// Test Helpers
// ============================================================================

fn populate_corpus(index: &mut SearchIndex, docs: usize) {
    for id in 0..docs as i64 {
        let text = format!(
            "alpha{} beta{} gamma{} shared filler{}",
            id % 5,
            id % 7,
            id % 11,
            id % 3
        );
        let status = match id % 4 {
            0 | 1 => DocumentStatus::Actual,
            2 => DocumentStatus::Irrelevant,
            _ => DocumentStatus::Banned,
        };
        index
            .add_document(id, &text, status, &[(id % 10) as i32, 3])
            .unwrap();
    }
}

fn assert_rankings_equal(lhs: &[quarry::Document], rhs: &[quarry::Document]) {
    assert_eq!(
        lhs.len(),
        rhs.len(),
        "paths returned different result counts"
    );
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        assert_eq!(a.id, b.id, "ids diverge between paths");
        assert!(
            (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON,
            "relevance diverges beyond epsilon: {} vs {}",
            a.relevance,
            b.relevance
        );
        assert_eq!(a.rating, b.rating);
    }
}

// ============================================================================
// Sequential / Parallel Equivalence
// ============================================================================

#[test]
fn test_seq_and_par_rankings_identical() {
    let mut index = SearchIndex::with_stop_words_text("shared").unwrap();
    populate_corpus(&mut index, 100);

    let queries = [
        "alpha0",
        "alpha1 beta2",
        "alpha2 beta3 gamma4 -filler0",
        "gamma1 gamma2 gamma3 gamma4 gamma5 -beta6",
        "-alpha0 -alpha1",
        "absentterm",
    ];
    for raw in queries {
        let sequential = index.find_top_documents(raw).unwrap();
        let parallel = index.par_find_top_documents(raw).unwrap();
        assert_rankings_equal(&sequential, &parallel);
    }
}

#[test]
fn test_seq_and_par_agree_across_statuses() {
    let mut index = SearchIndex::new();
    populate_corpus(&mut index, 60);

    for status in [
        DocumentStatus::Actual,
        DocumentStatus::Irrelevant,
        DocumentStatus::Banned,
        DocumentStatus::Removed,
    ] {
        let sequential = index
            .find_top_documents_with_status("alpha0 beta1 gamma2", status)
            .unwrap();
        let parallel = index
            .par_find_top_documents_with_status("alpha0 beta1 gamma2", status)
            .unwrap();
        assert_rankings_equal(&sequential, &parallel);
    }
}

#[test]
fn test_repeated_queries_identical() {
    let mut index = SearchIndex::new();
    populate_corpus(&mut index, 50);

    let first = index.par_find_top_documents("alpha0 beta1 -gamma2").unwrap();
    for _ in 0..5 {
        let again = index.par_find_top_documents("alpha0 beta1 -gamma2").unwrap();
        assert_eq!(first, again, "repeated parallel runs must not reorder");
    }
}

#[test]
fn test_par_match_agrees_with_sequential() {
    let mut index = SearchIndex::new();
    populate_corpus(&mut index, 30);

    for id in index.document_ids().collect::<Vec<_>>() {
        let sequential = index.match_document("alpha0 beta1 gamma2 -filler1", id).unwrap();
        let parallel = index
            .par_match_document("alpha0 beta1 gamma2 -filler1", id)
            .unwrap();
        assert_eq!(sequential, parallel);
    }
}

#[test]
fn test_batch_agrees_with_direct_queries() {
    let mut index = SearchIndex::new();
    populate_corpus(&mut index, 40);

    let queries: Vec<String> = (0..5).map(|i| format!("alpha{i} -beta{i}")).collect();
    let batch = quarry::process_queries(&index, &queries).unwrap();
    for (raw, results) in queries.iter().zip(&batch) {
        assert_eq!(&index.find_top_documents(raw).unwrap(), results);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

/// Small fixed vocabulary keeps generated corpora overlapping enough to
/// produce real matches and real exclusions.
const VOCABULARY: [&str; 8] = [
    "ash", "birch", "cedar", "elm", "fir", "maple", "oak", "pine",
];

fn document_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0..VOCABULARY.len(), 1..8)
        .prop_map(|words| {
            words
                .into_iter()
                .map(|w| VOCABULARY[w])
                .collect::<Vec<_>>()
                .join(" ")
        })
}

fn query_text() -> impl Strategy<Value = String> {
    prop::collection::vec((0..VOCABULARY.len(), prop::bool::ANY), 1..5).prop_map(|words| {
        words
            .into_iter()
            .map(|(w, minus)| {
                if minus {
                    format!("-{}", VOCABULARY[w])
                } else {
                    VOCABULARY[w].to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_term_frequencies_sum_to_one(texts in prop::collection::vec(document_text(), 1..10)) {
        let mut index = SearchIndex::new();
        for (id, text) in texts.iter().enumerate() {
            index
                .add_document(id as i64, text, DocumentStatus::Actual, &[])
                .unwrap();
        }
        for id in index.document_ids().collect::<Vec<_>>() {
            let total: f64 = index.word_frequencies(id).values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "tf sum drifted: {total}");
        }
    }

    #[test]
    fn prop_seq_and_par_agree(
        texts in prop::collection::vec(document_text(), 1..12),
        raw_query in query_text(),
    ) {
        let mut index = SearchIndex::new();
        for (id, text) in texts.iter().enumerate() {
            index
                .add_document(id as i64, text, DocumentStatus::Actual, &[])
                .unwrap();
        }
        let sequential = index.find_top_documents(&raw_query).unwrap();
        let parallel = index.par_find_top_documents(&raw_query).unwrap();

        prop_assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(parallel.iter()) {
            prop_assert_eq!(a.id, b.id);
            prop_assert!((a.relevance - b.relevance).abs() < RELEVANCE_EPSILON);
        }
    }
}
