//! Stop-word set
//!
//! A stop word is excluded from indexing and from query classification.
//! The set is validated and frozen at construction: empty entries are
//! dropped, duplicates collapse, and a control character in any entry
//! fails construction with `Error::InvalidTerm`.

use crate::tokenizer::{is_valid_term, split_words};
use quarry_core::{Error, Result};
use rustc_hash::FxHashSet;

/// Immutable set of stop words
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: FxHashSet<String>,
}

impl StopWordSet {
    /// Build a set from a container of words
    ///
    /// Empty entries are skipped and duplicates collapse into one entry.
    /// Fails when any entry contains a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FxHashSet::default();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_term(word) {
                return Err(Error::InvalidTerm {
                    term: word.to_string(),
                });
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    /// Build a set from space-separated text
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    /// Whether `word` is a stop word
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
