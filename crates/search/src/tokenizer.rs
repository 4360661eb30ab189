//! Tokenizer for indexing and query parsing
//!
//! This module provides word splitting and term validation. Splitting is
//! lazy and borrowing: it yields subslices of the input and allocates
//! nothing, so callers decide which words to persist.

/// Split text into non-empty words
///
/// Words are separated by one or more space characters; leading and
/// trailing spaces are ignored. Empty input yields an empty sequence.
///
/// # Example
///
/// ```
/// use quarry_search::tokenizer::split_words;
///
/// let words: Vec<&str> = split_words("  the   quick fox ").collect();
/// assert_eq!(words, vec!["the", "quick", "fox"]);
/// ```
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Check that a term carries no control characters
///
/// A term is valid when every code point is at or above 0x20. Control
/// bytes in document content or query text are a usage error, reported as
/// `Error::InvalidTerm` by the index rather than silently skipped.
pub fn is_valid_term(term: &str) -> bool {
    term.chars().all(|c| c as u32 >= 0x20)
}
