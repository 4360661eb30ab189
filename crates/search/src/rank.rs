//! Ranking engine
//!
//! This module provides:
//! - ScoreAggregator: the pluggable accumulation seam shared by both
//!   execution modes
//! - MapAccumulator: plain-map accumulation for the sequential path
//! - The top-documents query surface, sequential and parallel
//! - match_document: per-document term matching
//!
//! Both paths run the same algorithm: accumulate `tf * idf` for every
//! plus-term posting that passes the caller's predicate, then delete every
//! document matched by a minus-term, then materialize, sort and truncate.
//! The only difference is the aggregator the accumulation phase writes to
//! and whether plus-terms are visited serially or on the rayon pool.

use crate::index::SearchIndex;
use crate::query::Query;
use quarry_core::{
    Document, DocumentId, DocumentStatus, Error, Result, MAX_RESULT_COUNT, RELEVANCE_EPSILON,
};
use quarry_concurrency::ShardedMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::cmp::Ordering;
use tracing::trace;

/// Shard count of the per-query parallel accumulator
const ACCUMULATOR_SHARDS: usize = 100;

// ============================================================================
// ScoreAggregator
// ============================================================================

/// Relevance accumulation strategy
///
/// The ranking algorithm is written once against this trait; the
/// sequential path plugs in [`MapAccumulator`], the parallel path a
/// [`ShardedMap`]. Accumulation is a commutative sum, so the two produce
/// the same scores up to floating-point ordering (bounded by
/// [`RELEVANCE_EPSILON`]).
pub trait ScoreAggregator {
    /// Add `delta` to the running score of `id` (zero on first touch)
    fn accumulate(&self, id: DocumentId, delta: f64);

    /// Drop `id` from the accumulated scores, if present
    fn discard(&self, id: DocumentId);

    /// Consume the aggregator and yield the surviving (id, score) pairs
    fn finish(self) -> Vec<(DocumentId, f64)>;
}

/// Plain-map aggregator for single-threaded accumulation
///
/// Interior mutability keeps the trait surface uniform with the sharded
/// aggregator; `RefCell` is not `Sync`, so the type system keeps this
/// accumulator off the parallel path.
#[derive(Debug, Default)]
pub struct MapAccumulator {
    scores: RefCell<FxHashMap<DocumentId, f64>>,
}

impl ScoreAggregator for MapAccumulator {
    fn accumulate(&self, id: DocumentId, delta: f64) {
        *self.scores.borrow_mut().entry(id).or_insert(0.0) += delta;
    }

    fn discard(&self, id: DocumentId) {
        self.scores.borrow_mut().remove(&id);
    }

    fn finish(self) -> Vec<(DocumentId, f64)> {
        self.scores.into_inner().into_iter().collect()
    }
}

impl ScoreAggregator for ShardedMap<DocumentId, f64> {
    fn accumulate(&self, id: DocumentId, delta: f64) {
        *self.entry(id) += delta;
    }

    fn discard(&self, id: DocumentId) {
        self.remove(id);
    }

    fn finish(self) -> Vec<(DocumentId, f64)> {
        self.into_map().into_iter().collect()
    }
}

// ============================================================================
// Ranking order
// ============================================================================

/// Total result order: relevance descending, rating descending within the
/// epsilon band, id ascending as the final key
///
/// The trailing id key is an implementation choice; it makes repeated runs
/// and the sequential/parallel pair return byte-identical orderings.
fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating
            .cmp(&lhs.rating)
            .then_with(|| lhs.id.cmp(&rhs.id))
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

// ============================================================================
// Query surface
// ============================================================================

impl SearchIndex {
    /// Top documents with `Actual` status
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents passing an arbitrary predicate, evaluated sequentially
    ///
    /// The predicate sees (id, status, rating) for every posting of every
    /// plus-term; minus-term exclusion is absolute and ignores it. Results
    /// are sorted by descending relevance (rating, then ascending id,
    /// within [`RELEVANCE_EPSILON`]) and capped at [`MAX_RESULT_COUNT`].
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, self.stop_words())?;
        let scores = MapAccumulator::default();
        for term in &query.plus_terms {
            self.accumulate_term(term, &predicate, &scores);
        }
        self.discard_minus_matches(&query, &scores);
        Ok(self.materialize(scores.finish()))
    }

    /// Parallel mirror of [`find_top_documents`](Self::find_top_documents)
    pub fn par_find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.par_find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Parallel mirror of
    /// [`find_top_documents_with_status`](Self::find_top_documents_with_status)
    pub fn par_find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.par_find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents passing a predicate, accumulated on the rayon pool
    ///
    /// Plus-terms fan out across workers; each worker walks its term's
    /// postings and adds contributions into a sharded accumulator scoped
    /// to this call. Minus-term removal runs after every accumulation task
    /// has finished, so exclusion still always wins. Rankings equal the
    /// sequential path's up to [`RELEVANCE_EPSILON`].
    pub fn par_find_top_documents_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, self.stop_words())?;
        let scores = ShardedMap::with_shards(ACCUMULATOR_SHARDS);
        query
            .plus_terms
            .par_iter()
            .for_each(|term| self.accumulate_term(term, &predicate, &scores));
        self.discard_minus_matches(&query, &scores);
        Ok(self.materialize(scores.finish()))
    }

    /// Plus-terms of the query present in one document, with its status
    ///
    /// Returns the matched plus-terms sorted and deduplicated. When any
    /// minus-term matches the document, the term list is empty. Fails with
    /// `UnknownDocument` for an absent id.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self
            .status(id)
            .ok_or(Error::UnknownDocument { id })?;
        let query = Query::parse(raw_query, self.stop_words())?;

        for term in &query.minus_terms {
            if self.posting_contains(term, id) {
                return Ok((Vec::new(), status));
            }
        }
        // Plus-terms iterate in sorted order and are already deduplicated.
        let matched: Vec<String> = query
            .plus_terms
            .iter()
            .filter(|term| self.posting_contains(term.as_str(), id))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    /// Parallel mirror of [`match_document`](Self::match_document)
    pub fn par_match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self
            .status(id)
            .ok_or(Error::UnknownDocument { id })?;
        let query = Query::parse(raw_query, self.stop_words())?;

        if query
            .minus_terms
            .par_iter()
            .any(|term| self.posting_contains(term, id))
        {
            return Ok((Vec::new(), status));
        }
        let mut matched: Vec<String> = query
            .plus_terms
            .par_iter()
            .filter(|term| self.posting_contains(term.as_str(), id))
            .cloned()
            .collect();
        // Parallel collection does not preserve set order.
        matched.sort_unstable();
        Ok((matched, status))
    }

    // ========================================================================
    // Shared phases
    // ========================================================================

    /// Accumulate one plus-term's postings into the aggregator
    ///
    /// A term absent from the reverse index contributes nothing. A term
    /// present in every document has idf 0 and likewise contributes
    /// nothing; that is TF-IDF working as intended.
    fn accumulate_term<A, P>(&self, term: &str, predicate: &P, scores: &A)
    where
        A: ScoreAggregator,
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let Some(posting) = self.postings.get(term) else {
            return;
        };
        let idf = (self.document_count() as f64 / posting.len() as f64).ln();
        for (&id, &term_frequency) in posting {
            let meta = self
                .metadata
                .get(&id)
                .expect("index corrupted: posting references a document absent from the store");
            if predicate(id, meta.status, meta.rating) {
                scores.accumulate(id, term_frequency * idf);
            }
        }
    }

    /// Delete every document matched by a minus-term from the aggregator
    ///
    /// Runs strictly after plus-term accumulation, so exclusion wins no
    /// matter how highly a document scored.
    fn discard_minus_matches<A: ScoreAggregator>(&self, query: &Query, scores: &A) {
        for term in &query.minus_terms {
            if let Some(posting) = self.postings.get(term.as_str()) {
                for &id in posting.keys() {
                    scores.discard(id);
                }
            }
        }
    }

    /// Attach ratings, sort, and truncate to the result cap
    fn materialize(&self, scores: Vec<(DocumentId, f64)>) -> Vec<Document> {
        let mut matched: Vec<Document> = scores
            .into_iter()
            .map(|(id, relevance)| {
                let meta = self
                    .metadata
                    .get(&id)
                    .expect("index corrupted: scored document absent from the store");
                Document::new(id, relevance, meta.rating)
            })
            .collect();
        matched.sort_by(compare_documents);
        matched.truncate(MAX_RESULT_COUNT);
        trace!(results = matched.len(), "query materialized");
        matched
    }

    fn posting_contains(&self, term: &str, id: DocumentId) -> bool {
        self.postings
            .get(term)
            .map_or(false, |posting| posting.contains_key(&id))
    }
}
