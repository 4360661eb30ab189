//! Consumer-side helpers around the Quarry search core
//!
//! This crate provides the collaborators that sit on top of the index and
//! use only its public query surface:
//! - Paginator: fixed-size pages over a result slice
//! - RequestLog: bounded request-history window with no-result statistics
//! - Batch query evaluation across many queries at once

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod paginator;
pub mod request_log;

// Re-export commonly used types
pub use batch::{process_queries, process_queries_joined};
pub use paginator::{paginate, Page, Paginator};
pub use request_log::{RequestLog, REQUEST_WINDOW};
