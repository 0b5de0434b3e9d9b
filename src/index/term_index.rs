use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use crate::core::types::DocId;

/// Term frequencies of one document, keyed by interned term.
pub type TermFrequencies = BTreeMap<Arc<str>, f64>;

/// Documents containing one term, with the term's frequency in each.
pub type Postings = BTreeMap<DocId, f64>;

static EMPTY_FREQUENCIES: TermFrequencies = BTreeMap::new();

/// Forward and inverted index kept in lockstep.
///
/// Every `(doc, term, tf)` present in one map is present in the other with
/// the identical `tf`, and inverted rows are never left empty. Each distinct
/// term is allocated once and shared by both maps.
#[derive(Debug, Default)]
pub struct TermIndex {
    inverted: BTreeMap<Arc<str>, Postings>,
    forward: BTreeMap<DocId, TermFrequencies>,
}

impl TermIndex {
    pub fn new() -> Self {
        TermIndex::default()
    }

    /// Index the already analyzed `terms` of a document not yet present.
    /// A document with no terms still gets an (empty) forward entry.
    pub fn insert(&mut self, doc_id: DocId, terms: &[&str]) {
        debug_assert!(!self.forward.contains_key(&doc_id));

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &term in terms {
            *counts.entry(term).or_default() += 1;
        }

        let total = terms.len() as f64;
        let mut frequencies = TermFrequencies::new();
        for (term, count) in counts {
            let tf = count as f64 / total;
            let key = self.intern(term);
            self.inverted
                .entry(Arc::clone(&key))
                .or_default()
                .insert(doc_id, tf);
            frequencies.insert(key, tf);
        }

        self.forward.insert(doc_id, frequencies);
    }

    /// Remove a document from both maps. Returns false if it was absent.
    pub fn remove(&mut self, doc_id: DocId) -> bool {
        let Some(frequencies) = self.forward.remove(&doc_id) else {
            return false;
        };

        for term in frequencies.keys() {
            if let Some(postings) = self.inverted.get_mut(term) {
                postings.remove(&doc_id);
                if postings.is_empty() {
                    self.inverted.remove(term);
                }
            }
        }
        true
    }

    /// Same as [`remove`](Self::remove). Only the rows named by the document's
    /// forward entry are detached, updated on the rayon pool, and put back.
    pub fn par_remove(&mut self, doc_id: DocId) -> bool {
        let Some(frequencies) = self.forward.remove(&doc_id) else {
            return false;
        };

        let mut rows: Vec<(Arc<str>, Postings)> = frequencies
            .keys()
            .filter_map(|term| self.inverted.remove_entry(term))
            .collect();

        rows.par_iter_mut().for_each(|(_, postings)| {
            postings.remove(&doc_id);
        });

        self.inverted
            .extend(rows.into_iter().filter(|(_, postings)| !postings.is_empty()));
        true
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.inverted.get(term)
    }

    /// The interned spelling of `term` together with its postings.
    pub fn term_entry(&self, term: &str) -> Option<(&str, &Postings)> {
        self.inverted
            .get_key_value(term)
            .map(|(key, postings)| (&**key, postings))
    }

    pub fn frequencies(&self, doc_id: DocId) -> Option<&TermFrequencies> {
        self.forward.get(&doc_id)
    }

    /// Forward entry, or a shared empty map for unknown documents.
    pub fn frequencies_or_empty(&self, doc_id: DocId) -> &TermFrequencies {
        self.forward.get(&doc_id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    pub fn contains_document(&self, doc_id: DocId) -> bool {
        self.forward.contains_key(&doc_id)
    }

    pub fn term_count(&self) -> usize {
        self.inverted.len()
    }

    pub fn document_count(&self) -> usize {
        self.forward.len()
    }

    fn intern(&self, term: &str) -> Arc<str> {
        match self.inverted.get_key_value(term) {
            Some((key, _)) => Arc::clone(key),
            None => Arc::from(term),
        }
    }

    /// Check that the forward and inverted maps mirror each other.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(doc_id, frequencies)| {
            frequencies.iter().all(|(term, tf)| {
                self.inverted
                    .get(term)
                    .and_then(|postings| postings.get(doc_id))
                    .is_some_and(|other| other.to_bits() == tf.to_bits())
            })
        });
        let inverted_ok = self.inverted.iter().all(|(term, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(doc_id, tf)| {
                    self.forward
                        .get(doc_id)
                        .and_then(|frequencies| frequencies.get(term))
                        .is_some_and(|other| other.to_bits() == tf.to_bits())
                })
        });
        forward_ok && inverted_ok
    }
}
