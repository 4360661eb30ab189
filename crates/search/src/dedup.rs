//! Duplicate detection by term-set identity
//!
//! Two documents are duplicates when their term sets are exactly equal;
//! frequencies, word order and word counts are ignored. Stop words never
//! enter a term set, so documents differing only by stop words still group
//! together. Within a group the smallest id survives.

use crate::index::SearchIndex;
use crate::intern::Term;
use quarry_core::DocumentId;
use rustc_hash::FxHashMap;
use tracing::info;

/// Ids of documents that duplicate an earlier-kept representative
///
/// Groups live documents by exact term set and, in every group larger than
/// one, marks all but the smallest id. The returned ids are ascending.
/// The index is not modified.
pub fn find_duplicates(index: &SearchIndex) -> Vec<DocumentId> {
    let mut groups: FxHashMap<Vec<Term>, Vec<DocumentId>> = FxHashMap::default();
    for id in index.document_ids() {
        // Sorted term list as the canonical form of the term set.
        let mut terms: Vec<Term> = index.word_frequencies(id).keys().cloned().collect();
        terms.sort_unstable();
        groups.entry(terms).or_default().push(id);
    }

    let mut doomed = Vec::new();
    for mut ids in groups.into_values() {
        if ids.len() < 2 {
            continue;
        }
        ids.sort_unstable();
        doomed.extend(ids.into_iter().skip(1));
    }
    doomed.sort_unstable();
    doomed
}

/// Remove every duplicate document, keeping one representative per group
///
/// Removal goes through [`SearchIndex::remove_document`], one notification
/// per removed id. Returns the removed ids in ascending order. Running it
/// again right away removes nothing.
pub fn remove_duplicates(index: &mut SearchIndex) -> Vec<DocumentId> {
    let doomed = find_duplicates(index);
    for &id in &doomed {
        info!(document_id = id, "found duplicate document");
        index.remove_document(id);
    }
    doomed
}
