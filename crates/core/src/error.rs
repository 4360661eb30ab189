//! Error types for the Quarry search engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Validation failures are reported before any state is touched: an add or
//! query that fails with one of these errors leaves the index unchanged.

use crate::types::DocumentId;
use thiserror::Error;

/// Result type alias for Quarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Quarry search engine
#[derive(Debug, Error)]
pub enum Error {
    /// Document id rejected on add: negative, or already present in the index
    #[error("invalid document id {id}: negative or already present")]
    InvalidDocumentId {
        /// The rejected id
        id: DocumentId,
    },

    /// Term rejected during indexing or query parsing
    ///
    /// A term is invalid when, after stripping one leading negation marker,
    /// it is empty, starts with another marker, or contains a control
    /// character (code point below 0x20).
    #[error("invalid term {term:?}")]
    InvalidTerm {
        /// The offending term as supplied by the caller
        term: String,
    },

    /// Lookup that requires the document to exist was given an absent id
    #[error("unknown document id {id}")]
    UnknownDocument {
        /// The absent id
        id: DocumentId,
    },
}
