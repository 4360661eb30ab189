//! In-memory TF-IDF search core
//!
//! This crate provides:
//! - Tokenizer: lazy whitespace splitting and term validation
//! - StopWordSet: immutable, validated stop-word filter
//! - Query builder: plus/minus term classification and deduplication
//! - SearchIndex: document store with interlocked forward and reverse maps
//! - Ranking engine: sequential and data-parallel TF-IDF evaluation
//! - Duplicate detection by exact term-set identity
//!
//! # Concurrency
//!
//! Queries read shared index state; add and remove mutate it. The crate
//! does not synchronize structural mutation against in-flight queries:
//! callers needing that guarantee must serialize writes against query
//! execution. The parallel query path synchronizes only its own score
//! accumulation, through `quarry_concurrency::ShardedMap`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dedup;
pub mod index;
pub mod intern;
pub mod query;
pub mod rank;
pub mod stopwords;
pub mod tokenizer;

// Re-export commonly used types
pub use dedup::{find_duplicates, remove_duplicates};
pub use index::{SearchIndex, TermFrequencies};
pub use intern::{Term, TermArena};
pub use query::{classify_word, Query, QueryWord};
pub use rank::{MapAccumulator, ScoreAggregator};
pub use stopwords::StopWordSet;
pub use tokenizer::{is_valid_term, split_words};
