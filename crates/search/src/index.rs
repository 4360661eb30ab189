//! Document store and reverse index
//!
//! This module provides `SearchIndex`, the owning structure for:
//! - per-document metadata (status, average rating)
//! - the forward map: document id to term frequencies
//! - the reverse index: term to (document id, term frequency) postings
//! - the insertion-order roster of live document ids
//!
//! # Invariant
//!
//! Every (document, term, frequency) triple reachable from the forward map
//! is reachable from the reverse index and vice versa. Both maps are
//! updated inside a single mutating operation and never exposed for
//! independent mutation, so they cannot drift apart.

use crate::intern::{Term, TermArena};
use crate::stopwords::StopWordSet;
use crate::tokenizer::{is_valid_term, split_words};
use once_cell::sync::Lazy;
use quarry_core::{DocumentId, DocumentStatus, Error, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Term-frequency map of one document
pub type TermFrequencies = FxHashMap<Term, f64>;

/// Shared empty map returned for unknown-id frequency lookups
static EMPTY_FREQUENCIES: Lazy<TermFrequencies> = Lazy::new(TermFrequencies::default);

/// Per-document metadata
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentMeta {
    pub(crate) rating: i32,
    pub(crate) status: DocumentStatus,
}

// ============================================================================
// SearchIndex
// ============================================================================

/// In-memory document index
///
/// Documents are added with caller-assigned non-negative ids and immutable
/// content; the only mutation after add is removal. Queries never mutate
/// the index.
///
/// # Thread Safety
///
/// Shared references support concurrent queries (including the parallel
/// ranking path). Add and remove need exclusive access; the index does not
/// synchronize writers against in-flight queries.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    stop_words: StopWordSet,
    arena: TermArena,
    /// term -> document id -> term frequency
    pub(crate) postings: FxHashMap<Term, FxHashMap<DocumentId, f64>>,
    /// document id -> term -> term frequency
    doc_terms: FxHashMap<DocumentId, TermFrequencies>,
    pub(crate) metadata: FxHashMap<DocumentId, DocumentMeta>,
    /// Live ids in insertion order
    roster: Vec<DocumentId>,
}

impl SearchIndex {
    /// Create an index with no stop words
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index with the given stop words
    ///
    /// Fails when any stop word contains a control character.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(SearchIndex {
            stop_words: StopWordSet::new(words)?,
            ..Self::default()
        })
    }

    /// Create an index with stop words parsed from space-separated text
    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        Ok(SearchIndex {
            stop_words: StopWordSet::from_text(text)?,
            ..Self::default()
        })
    }

    /// The stop-word set this index filters with
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Add a document
    ///
    /// Fails with `InvalidDocumentId` when `id` is negative or already
    /// present, and with `InvalidTerm` when any word of `text` carries a
    /// control character. Validation happens before any state is touched,
    /// so a failed add leaves the index unchanged.
    ///
    /// The rating stored for the document is the truncating integer mean
    /// of `ratings` (0 when empty). Runs in O(terms).
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 || self.metadata.contains_key(&id) {
            return Err(Error::InvalidDocumentId { id });
        }
        let words = self.split_into_words_no_stop(text)?;

        let mut frequencies = TermFrequencies::default();
        if !words.is_empty() {
            let occurrence_weight = 1.0 / words.len() as f64;
            for word in &words {
                let term = self.arena.intern(word);
                *self
                    .postings
                    .entry(Arc::clone(&term))
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += occurrence_weight;
                *frequencies.entry(term).or_insert(0.0) += occurrence_weight;
            }
        }

        self.doc_terms.insert(id, frequencies);
        self.metadata.insert(
            id,
            DocumentMeta {
                rating: average_rating(ratings),
                status,
            },
        );
        self.roster.push(id);
        debug!(document_id = id, terms = words.len(), "document added");
        Ok(())
    }

    /// Remove a document
    ///
    /// Retracts the id from the roster, the metadata map, the forward map,
    /// and every reverse-index posting it participated in. Postings that
    /// become empty are cleared along with their interned term, so memory
    /// stays bounded. Removing an unknown id is a silent no-op.
    pub fn remove_document(&mut self, id: DocumentId) {
        let Some(frequencies) = self.doc_terms.remove(&id) else {
            trace!(document_id = id, "remove skipped: unknown id");
            return;
        };
        for term in frequencies.keys() {
            if let Some(posting) = self.postings.get_mut(term) {
                posting.remove(&id);
                if posting.is_empty() {
                    self.postings.remove(term);
                    self.arena.release(term);
                }
            }
        }
        self.metadata.remove(&id);
        if let Some(position) = self.roster.iter().position(|&live| live == id) {
            self.roster.remove(position);
        }
        debug!(document_id = id, "document removed");
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Number of live documents
    pub fn document_count(&self) -> usize {
        self.roster.len()
    }

    /// Live document ids in insertion order
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.roster.iter().copied()
    }

    /// Term frequencies of one document
    ///
    /// Returns a shared empty map for unknown ids; absence is not an error
    /// here.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.doc_terms.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Status of a document, if present
    pub fn status(&self, id: DocumentId) -> Option<DocumentStatus> {
        self.metadata.get(&id).map(|meta| meta.status)
    }

    /// Stored average rating of a document, if present
    pub fn rating(&self, id: DocumentId) -> Option<i32> {
        self.metadata.get(&id).map(|meta| meta.rating)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Split document text into validated, stop-filtered words
    ///
    /// Any invalid word fails the whole call, before the caller mutates
    /// anything.
    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_term(word) {
                return Err(Error::InvalidTerm {
                    term: word.to_string(),
                });
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

/// Truncating integer mean, 0 for an empty slice
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
