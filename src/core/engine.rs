use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentData, DocumentStatus, ExecutionPolicy};
use crate::index::concurrent_map::ConcurrentMap;
use crate::index::term_index::{TermFrequencies, TermIndex};
use crate::query::ast::Query;
use crate::query::parser::QueryParser;
use crate::scoring::scorer::TfIdfScorer;
use crate::search::filter::DocumentFilter;
use crate::search::results::{rank_documents, ScoredDocument, MAX_RESULT_DOCUMENT_COUNT};

/// Terms of a query found in a document, plus the document's status.
pub type MatchResult<'e> = (Vec<&'e str>, DocumentStatus);

/// In-memory TF-IDF search engine.
///
/// The engine owns both indices and all document data. It holds no locks:
/// reads may run concurrently through `&SearchEngine`, writes need
/// `&mut SearchEngine`.
pub struct SearchEngine {
    config: Config,
    analyzer: Analyzer,
    scorer: TfIdfScorer,
    index: TermIndex,
    documents: BTreeMap<DocId, DocumentData>,
    document_ids: BTreeSet<DocId>,
}

impl SearchEngine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let stop_words = StopWordFilter::from_terms(&config.stop_words)?;

        Ok(SearchEngine {
            config,
            analyzer: Analyzer::new(stop_words),
            scorer: TfIdfScorer::new(),
            index: TermIndex::new(),
            documents: BTreeMap::new(),
            document_ids: BTreeSet::new(),
        })
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchEngine::new(Config::default().with_stop_words(stop_words))
    }

    /// Stop words given as one space-separated string, e.g. `"and in on"`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        SearchEngine::with_stop_words(text.split(' '))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWordFilter {
        &self.analyzer.stop_words
    }

    pub fn add_document(
        &mut self,
        doc_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if doc_id.0 < 0 {
            return Err(Error::invalid_argument(format!(
                "Document id {} is negative",
                doc_id
            )));
        }
        if self.documents.contains_key(&doc_id) {
            return Err(Error::invalid_argument(format!(
                "Document id {} is already indexed",
                doc_id
            )));
        }

        let data = DocumentData::new(text, status, ratings);
        let terms = self.analyzer.analyze(&data.text)?;

        self.index.insert(doc_id, &terms);
        debug!(doc_id = %doc_id, terms = terms.len(), ?status, rating = data.rating, "document added");
        self.documents.insert(doc_id, data);
        self.document_ids.insert(doc_id);

        Ok(())
    }

    pub fn remove_document(&mut self, doc_id: DocId) {
        self.remove_document_with(ExecutionPolicy::Sequential, doc_id);
    }

    /// Remove a document; absent ids are ignored.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, doc_id: DocId) {
        let removed = match policy {
            ExecutionPolicy::Sequential => self.index.remove(doc_id),
            ExecutionPolicy::Parallel => self.index.par_remove(doc_id),
        };
        if !removed {
            return;
        }

        self.documents.remove(&doc_id);
        self.document_ids.remove(&doc_id);
        debug!(doc_id = %doc_id, ?policy, "document removed");
    }

    /// Term frequencies of a document; empty for unknown ids.
    pub fn get_word_frequencies(&self, doc_id: DocId) -> &TermFrequencies {
        self.index.frequencies_or_empty(doc_id)
    }

    pub fn get_document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id at `index` in ascending id order.
    pub fn get_document_id_at(&self, index: usize) -> Result<DocId> {
        self.document_ids.iter().nth(index).copied().ok_or_else(|| {
            Error::out_of_range(format!(
                "Index {} is beyond document count {}",
                index,
                self.document_ids.len()
            ))
        })
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn get_document_text(&self, doc_id: DocId) -> Option<&str> {
        self.documents.get(&doc_id).map(|data| &*data.text)
    }

    pub fn get_document_status(&self, doc_id: DocId) -> Option<DocumentStatus> {
        self.documents.get(&doc_id).map(|data| data.status)
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, DocumentFilter::default())
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, DocumentFilter::Status(status))
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, DocumentFilter::Predicate(&predicate))
    }

    /// Rank documents for `raw_query`: TF-IDF over plus terms among the
    /// documents `filter` accepts, minus terms veto, at most
    /// [`MAX_RESULT_DOCUMENT_COUNT`] results.
    pub fn find_top_documents_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        filter: DocumentFilter<'_>,
    ) -> Result<Vec<ScoredDocument>> {
        let query = self.parser().parse(raw_query)?;

        let matched = match filter {
            DocumentFilter::Status(wanted) => {
                self.find_all_documents(policy, &query, move |_, status, _| status == wanted)
            }
            DocumentFilter::Predicate(predicate) => self.find_all_documents(policy, &query, predicate),
        };

        let top = rank_documents(matched, MAX_RESULT_DOCUMENT_COUNT);
        trace!(query = raw_query, ?policy, hits = top.len(), "search completed");
        Ok(top)
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query<'_>, predicate: P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance = match policy {
            ExecutionPolicy::Sequential => self.score_sequential(query, &predicate),
            ExecutionPolicy::Parallel => self.score_parallel(query, &predicate),
        };

        relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.documents
                    .get(&doc_id)
                    .map(|data| ScoredDocument::new(doc_id, relevance, data.rating))
            })
            .collect()
    }

    fn score_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for term in &query.plus_terms {
            let Some(postings) = self.index.postings(term) else {
                continue;
            };
            let idf = self.scorer.idf(self.get_document_count(), postings.len());
            for (&doc_id, &tf) in postings {
                if self.accepts(doc_id, predicate) {
                    *relevance.entry(doc_id).or_default() += self.scorer.score(tf, idf);
                }
            }
        }

        for term in &query.minus_terms {
            if let Some(postings) = self.index.postings(term) {
                for doc_id in postings.keys() {
                    relevance.remove(doc_id);
                }
            }
        }

        relevance
    }

    fn score_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.config.concurrent_buckets);

        query.plus_terms.par_iter().for_each(|term| {
            let Some(postings) = self.index.postings(term) else {
                return;
            };
            let idf = self.scorer.idf(self.get_document_count(), postings.len());
            for (&doc_id, &tf) in postings {
                if self.accepts(doc_id, predicate) {
                    relevance.update(doc_id, |score| *score += self.scorer.score(tf, idf));
                }
            }
        });

        query.minus_terms.par_iter().for_each(|term| {
            if let Some(postings) = self.index.postings(term) {
                for doc_id in postings.keys() {
                    relevance.erase(doc_id);
                }
            }
        });

        relevance.into_ordinary_map()
    }

    fn accepts<P>(&self, doc_id: DocId, predicate: &P) -> bool
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        self.documents
            .get(&doc_id)
            .is_some_and(|data| predicate(doc_id, data.status, data.rating))
    }

    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<MatchResult<'_>> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, doc_id)
    }

    /// Plus terms of `raw_query` present in the document, sorted and
    /// deduplicated; empty if any minus term is present. Returned terms
    /// borrow the engine's interned copies.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<MatchResult<'_>> {
        let status = self.get_document_status(doc_id).ok_or_else(|| {
            Error::invalid_argument(format!("Document id {} is not indexed", doc_id))
        })?;

        let matched = match policy {
            ExecutionPolicy::Sequential => self.match_sequential(raw_query, doc_id)?,
            ExecutionPolicy::Parallel => self.match_parallel(raw_query, doc_id)?,
        };
        Ok((matched, status))
    }

    fn match_sequential(&self, raw_query: &str, doc_id: DocId) -> Result<Vec<&str>> {
        let query = self.parser().parse(raw_query)?;

        let vetoed = query.minus_terms.iter().any(|term| {
            self.index
                .postings(term)
                .is_some_and(|postings| postings.contains_key(&doc_id))
        });
        if vetoed {
            return Ok(Vec::new());
        }

        Ok(query
            .plus_terms
            .iter()
            .filter_map(|term| self.index.term_entry(term))
            .filter(|(_, postings)| postings.contains_key(&doc_id))
            .map(|(term, _)| term)
            .collect())
    }

    /// Works off the document's own forward entry instead of the inverted
    /// index, with the raw (unsorted) query.
    fn match_parallel(&self, raw_query: &str, doc_id: DocId) -> Result<Vec<&str>> {
        let query = self.parser().parse_raw(raw_query)?;
        let frequencies = self.index.frequencies_or_empty(doc_id);

        if query.minus_terms.par_iter().any(|term| frequencies.contains_key(*term)) {
            return Ok(Vec::new());
        }

        let mut matched: Vec<&str> = query
            .plus_terms
            .par_iter()
            .filter_map(|term| frequencies.get_key_value(*term).map(|(key, _)| &**key))
            .collect();
        matched.par_sort_unstable();
        matched.dedup();
        Ok(matched)
    }

    fn parser(&self) -> QueryParser<'_> {
        QueryParser::new(&self.analyzer.stop_words)
    }
}

impl<'e> IntoIterator for &'e SearchEngine {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'e, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}
