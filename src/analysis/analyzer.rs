use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_term, split_into_terms};
use crate::core::error::{Error, Result};

/// Text analysis pipeline: split, validate, drop stop words.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub stop_words: StopWordFilter,
}

impl Analyzer {
    pub fn new(stop_words: StopWordFilter) -> Self {
        Analyzer { stop_words }
    }

    /// Terms of `text` that take part in indexing, in document order.
    /// Fails on the first term carrying control characters.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut terms = Vec::new();
        for term in split_into_terms(text) {
            if !is_valid_term(term) {
                return Err(Error::invalid_argument(format!(
                    "Term {:?} contains control characters",
                    term
                )));
            }
            if !self.stop_words.contains(term) {
                terms.push(term);
            }
        }
        Ok(terms)
    }
}
