//! Term interning
//!
//! The forward map (document to terms) and the reverse index (term to
//! postings) both key on term text. Interning keeps exactly one owned
//! string per unique term: both maps hold cheap clones of the same
//! `Arc<str>`, and the arena releases a string once its last posting is
//! gone, so memory stays bounded by the live vocabulary.

use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Shared handle to interned term text
///
/// `Arc` rather than `Rc` because the parallel query path reads terms
/// from worker threads.
pub type Term = Arc<str>;

/// Arena of interned term strings
#[derive(Debug, Clone, Default)]
pub struct TermArena {
    terms: FxHashSet<Term>,
}

impl TermArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared handle for `word`, allocating it on first sight
    pub fn intern(&mut self, word: &str) -> Term {
        if let Some(term) = self.terms.get(word) {
            return Arc::clone(term);
        }
        let term: Term = Arc::from(word);
        self.terms.insert(Arc::clone(&term));
        term
    }

    /// Look up the handle for `word` without allocating
    pub fn get(&self, word: &str) -> Option<Term> {
        self.terms.get(word).map(Arc::clone)
    }

    /// Drop `word` from the arena
    ///
    /// Called when the last posting for a term is retracted. Handles still
    /// held elsewhere keep the allocation alive until they drop.
    pub fn release(&mut self, word: &str) {
        self.terms.remove(word);
    }

    /// Number of distinct interned terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the arena holds no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_returns_shared_allocation() {
        let mut arena = TermArena::new();
        let first = arena.intern("fox");
        let second = arena.intern("fox");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_get_does_not_allocate_new_terms() {
        let mut arena = TermArena::new();
        assert!(arena.get("missing").is_none());
        arena.intern("present");
        assert_eq!(arena.get("present").as_deref(), Some("present"));
    }

    #[test]
    fn test_release_forgets_term() {
        let mut arena = TermArena::new();
        let held = arena.intern("transient");
        arena.release("transient");
        assert!(arena.is_empty());
        // The outstanding handle stays valid after release.
        assert_eq!(&*held, "transient");
    }
}
