//! Quarry - embedded in-memory TF-IDF document search engine
//!
//! Quarry keeps a document collection in memory and answers relevance
//! queries over it: TF-IDF scoring with plus/minus query terms, status
//! predicates, a fixed result cap, and a data-parallel evaluation path
//! that accumulates scores through a sharded concurrent map.
//!
//! # Quick Start
//!
//! ```
//! use quarry::{DocumentStatus, SearchIndex};
//!
//! let mut index = SearchIndex::with_stop_words_text("and the")?;
//! index.add_document(0, "curly and the fluffy cat", DocumentStatus::Actual, &[7, 2, 7])?;
//! index.add_document(1, "well groomed dog", DocumentStatus::Actual, &[5, 1])?;
//!
//! let results = index.find_top_documents("fluffy groomed cat -dog")?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, 0);
//! # Ok::<(), quarry::Error>(())
//! ```
//!
//! # Architecture
//!
//! The index owns two interlocked maps (document to term frequencies, and
//! term to postings) updated together by every mutation. Queries never
//! mutate the index; the parallel path fans plus-terms out over rayon
//! workers that meet only inside a per-query [`ShardedMap`]. Consumer-side
//! helpers (pagination, request history, batch evaluation) sit on top and
//! use only the public query surface.

// Re-export the public API from the member crates
pub use quarry_core::{
    Document, DocumentId, DocumentStatus, Error, Result, MAX_RESULT_COUNT, RELEVANCE_EPSILON,
};

pub use quarry_search::{
    classify_word, find_duplicates, is_valid_term, remove_duplicates, split_words, MapAccumulator,
    Query, QueryWord, ScoreAggregator, SearchIndex, StopWordSet, Term, TermArena, TermFrequencies,
};

pub use quarry_concurrency::{EntryGuard, ShardKey, ShardedMap};

pub use quarry_api::{
    paginate, process_queries, process_queries_joined, Page, Paginator, RequestLog, REQUEST_WINDOW,
};
