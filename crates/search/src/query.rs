//! Query parsing
//!
//! This module provides:
//! - classify_word: split a raw token into text, negation flag, stop flag
//! - Query: deduplicated plus-term and minus-term sets built from raw text
//!
//! A leading `-` marks a minus term. After stripping one marker, the rest
//! must be non-empty, must not start with another marker, and must carry
//! no control characters; anything else is `Error::InvalidTerm`.

use crate::stopwords::StopWordSet;
use crate::tokenizer::{is_valid_term, split_words};
use quarry_core::{Error, Result};
use std::collections::BTreeSet;

/// A classified query token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord {
    /// Token text with the negation marker stripped
    pub text: String,
    /// Whether the token carried a leading negation marker
    pub is_minus: bool,
    /// Whether the stripped text is a stop word
    pub is_stop: bool,
}

/// Classify one raw query token
///
/// Classification is a pure function of the token text and the stop-word
/// set, which is what makes deduplicating tokens before classification
/// safe (each distinct token is classified exactly once).
pub fn classify_word(raw: &str, stop_words: &StopWordSet) -> Result<QueryWord> {
    let invalid = || Error::InvalidTerm {
        term: raw.to_string(),
    };
    if raw.is_empty() {
        return Err(invalid());
    }
    let (text, is_minus) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    if text.is_empty() || text.starts_with('-') || !is_valid_term(text) {
        return Err(invalid());
    }
    Ok(QueryWord {
        text: text.to_string(),
        is_minus,
        is_stop: stop_words.contains(text),
    })
}

/// A parsed query: deduplicated plus-term and minus-term sets
///
/// Ordered sets keep iteration deterministic, which keeps matched-term
/// output sorted and repeated query runs identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms that must match and contribute to relevance
    pub plus_terms: BTreeSet<String>,
    /// Terms whose presence excludes a document entirely
    pub minus_terms: BTreeSet<String>,
}

impl Query {
    /// Parse raw query text
    ///
    /// Tokens are deduplicated first, then classified; non-stop words are
    /// routed into the plus or minus set. The marker is stripped before
    /// set insertion, so `fox` and `-fox` in one query yield the term in
    /// both sets rather than a marker-prefixed phantom term.
    pub fn parse(raw: &str, stop_words: &StopWordSet) -> Result<Query> {
        let mut tokens: Vec<&str> = split_words(raw).collect();
        tokens.sort_unstable();
        tokens.dedup();

        let mut query = Query::default();
        for token in tokens {
            let word = classify_word(token, stop_words)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_terms.insert(word.text);
            } else {
                query.plus_terms.insert(word.text);
            }
        }
        Ok(query)
    }

    /// Whether the query has no usable terms at all
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}
