use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_term, split_into_terms};
use crate::core::error::{Error, Result};
use crate::query::ast::{Query, QueryTerm};

const MINUS_PREFIX: char = '-';

/// Query parser for converting raw query text into plus/minus term sets
pub struct QueryParser<'s> {
    pub stop_words: &'s StopWordFilter,
}

impl<'s> QueryParser<'s> {
    pub fn new(stop_words: &'s StopWordFilter) -> Self {
        QueryParser { stop_words }
    }

    /// Parse a query into its canonical form.
    /// Examples:
    /// - "fluffy cat" -> plus {cat, fluffy}
    /// - "cat -collar" -> plus {cat}, minus {collar}
    /// - "cat --collar", "cat -" -> InvalidArgument
    pub fn parse<'q>(&self, input: &'q str) -> Result<Query<'q>> {
        Ok(self.parse_raw(input)?.canonicalize())
    }

    /// Parse without sorting or deduplicating the term sets.
    pub fn parse_raw<'q>(&self, input: &'q str) -> Result<Query<'q>> {
        let mut query = Query::new();

        for word in split_into_terms(input) {
            let term = self.parse_term(word)?;
            if term.is_stop {
                continue;
            }
            if term.is_minus {
                query.minus_terms.push(term.text);
            } else {
                query.plus_terms.push(term.text);
            }
        }

        Ok(query)
    }

    fn parse_term<'q>(&self, word: &'q str) -> Result<QueryTerm<'q>> {
        if word.is_empty() {
            return Err(Error::invalid_argument("Empty query term"));
        }
        if word == "-" || word.starts_with("--") {
            return Err(Error::invalid_argument(format!(
                "Malformed minus term {:?}",
                word
            )));
        }
        if !is_valid_term(word) {
            return Err(Error::invalid_argument(format!(
                "Query term {:?} contains control characters",
                word
            )));
        }

        let (text, is_minus) = match word.strip_prefix(MINUS_PREFIX) {
            Some(rest) => (rest, true),
            None => (word, false),
        };

        Ok(QueryTerm {
            text,
            is_minus,
            is_stop: self.stop_words.contains(text),
        })
    }
}
