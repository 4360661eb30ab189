//! Bounded request-history window
//!
//! Wraps a search index and records, for the most recent requests, whether
//! each one produced results. The window covers the last
//! [`REQUEST_WINDOW`] requests (one day at one request per minute); older
//! entries fall off the front as new requests arrive.

use quarry_core::{Document, DocumentId, DocumentStatus, Result};
use quarry_search::SearchIndex;
use std::collections::VecDeque;
use tracing::trace;

/// Requests retained in the statistics window (minutes per day)
pub const REQUEST_WINDOW: usize = 1440;

/// Per-request record kept in the window
#[derive(Debug, Clone, Copy)]
struct RequestRecord {
    matched: bool,
}

/// Sliding window of recent requests over one index
///
/// All queries go through the wrapped index's public query surface; the
/// log itself never touches index internals.
#[derive(Debug)]
pub struct RequestLog<'a> {
    index: &'a SearchIndex,
    window: VecDeque<RequestRecord>,
}

impl<'a> RequestLog<'a> {
    /// Create an empty log over `index`
    pub fn new(index: &'a SearchIndex) -> Self {
        RequestLog {
            index,
            window: VecDeque::with_capacity(REQUEST_WINDOW),
        }
    }

    /// Run a default-status query and record its outcome
    pub fn add_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.index.find_top_documents(raw_query)?;
        self.record(&results);
        Ok(results)
    }

    /// Run a status-filtered query and record its outcome
    pub fn add_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results = self
            .index
            .find_top_documents_with_status(raw_query, status)?;
        self.record(&results);
        Ok(results)
    }

    /// Run a predicate-filtered query and record its outcome
    pub fn add_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let results = self.index.find_top_documents_with(raw_query, predicate)?;
        self.record(&results);
        Ok(results)
    }

    /// Requests in the current window that produced no results
    pub fn no_result_requests(&self) -> usize {
        self.window.iter().filter(|record| !record.matched).count()
    }

    /// Requests currently held in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no requests have been recorded yet
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Record one finished request, evicting the oldest beyond the window
    ///
    /// Queries that fail validation are never recorded; the error
    /// propagates before this point.
    fn record(&mut self, results: &[Document]) {
        if self.window.len() == REQUEST_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(RequestRecord {
            matched: !results.is_empty(),
        });
        trace!(
            window = self.window.len(),
            matched = !results.is_empty(),
            "request recorded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index() -> SearchIndex {
        let mut index = SearchIndex::new();
        index
            .add_document(0, "curly cat", DocumentStatus::Actual, &[1])
            .unwrap();
        index
            .add_document(1, "sad dog", DocumentStatus::Banned, &[2])
            .unwrap();
        index
    }

    #[test]
    fn test_counts_no_result_requests() {
        let index = test_index();
        let mut log = RequestLog::new(&index);

        log.add_request("cat").unwrap();
        log.add_request("parrot").unwrap();
        // Banned doc never matches the default surface.
        log.add_request("dog").unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log.no_result_requests(), 2);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let index = test_index();
        let mut log = RequestLog::new(&index);

        // Fill the whole window with empty-result requests.
        for _ in 0..REQUEST_WINDOW {
            log.add_request("parrot").unwrap();
        }
        assert_eq!(log.no_result_requests(), REQUEST_WINDOW);

        // Each matching request now evicts one empty-result record.
        for done in 1..=10 {
            log.add_request("cat").unwrap();
            assert_eq!(log.len(), REQUEST_WINDOW);
            assert_eq!(log.no_result_requests(), REQUEST_WINDOW - done);
        }
    }

    #[test]
    fn test_invalid_query_not_recorded() {
        let index = test_index();
        let mut log = RequestLog::new(&index);
        assert!(log.add_request("--broken").is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_status_and_predicate_requests() {
        let index = test_index();
        let mut log = RequestLog::new(&index);

        let banned = log
            .add_request_with_status("dog", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.len(), 1);

        let rated = log
            .add_request_with("cat dog", |_, _, rating| rating >= 2)
            .unwrap();
        assert_eq!(rated.len(), 1);
        assert_eq!(rated[0].id, 1);

        assert_eq!(log.no_result_requests(), 0);
    }
}
