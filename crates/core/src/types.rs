//! Document types and system constants
//!
//! This module defines:
//! - DocumentId: caller-assigned identifier, validated non-negative on add
//! - DocumentStatus: lifecycle status, opaque to scoring
//! - Document: ranked search result triple
//! - MAX_RESULT_COUNT / RELEVANCE_EPSILON: fixed system constants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned document identifier
///
/// Ids are validated non-negative when a document is added and stay unique
/// among live documents. The signed representation lets validation reject
/// negative input instead of silently wrapping it.
pub type DocumentId = i64;

/// Maximum number of documents returned by a top-documents query
pub const MAX_RESULT_COUNT: usize = 5;

/// Relevance scores closer than this are considered equal when ranking
///
/// The parallel path accumulates floating-point sums in a different order
/// than the sequential path, so rankings are compared up to this epsilon.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

// ============================================================================
// DocumentStatus
// ============================================================================

/// Lifecycle status attached to every document
///
/// The status is caller-assigned and opaque to scoring. Queries filter on it
/// through a predicate; the default query surface matches `Actual` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live document, matched by the default query surface
    #[default]
    Actual,
    /// Kept in the index but no longer relevant
    Irrelevant,
    /// Excluded by moderation
    Banned,
    /// Marked for removal
    Removed,
}

// ============================================================================
// Document
// ============================================================================

/// A ranked search result
///
/// Produced by the ranking engine: the document id, its accumulated TF-IDF
/// relevance, and the stored average rating used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id of the matched document
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance score
    pub relevance: f64,
    /// Truncating integer average of the caller-supplied ratings
    pub rating: i32,
}

impl Document {
    /// Create a new result triple
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}
