use std::collections::BTreeSet;
use crate::analysis::tokenizer::{is_valid_term, split_into_terms};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    pub stop_words: BTreeSet<String>,
}

impl StopWordFilter {
    /// Build from individual words. Empty words are dropped and words are
    /// further split on spaces.
    pub fn from_terms<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = StopWordFilter::default();
        for entry in stop_words {
            filter.extend_from_text(entry.as_ref())?;
        }
        Ok(filter)
    }

    /// Build from a space-separated list such as `"and in on"`.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut filter = StopWordFilter::default();
        filter.extend_from_text(text)?;
        Ok(filter)
    }

    fn extend_from_text(&mut self, text: &str) -> Result<()> {
        for word in split_into_terms(text) {
            if !is_valid_term(word) {
                return Err(Error::invalid_argument(format!(
                    "Stop word {:?} contains control characters",
                    word
                )));
            }
            self.stop_words.insert(word.to_string());
        }
        Ok(())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}
