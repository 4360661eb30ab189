//! Core types for the Quarry search engine
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: caller-assigned document identifier
//! - DocumentStatus: lifecycle status attached to every document
//! - Document: a ranked search result (id, relevance, rating)
//! - Error: error type hierarchy
//! - System constants: result cap and relevance comparison epsilon

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{Document, DocumentId, DocumentStatus, MAX_RESULT_COUNT, RELEVANCE_EPSILON};
