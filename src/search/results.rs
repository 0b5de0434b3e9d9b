use serde::{Serialize, Deserialize};
use std::fmt;
use crate::core::types::DocId;

/// Upper bound on documents returned by one search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-10;

/// Document with relevance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(doc_id: DocId, relevance: f64, rating: i32) -> Self {
        ScoredDocument { doc_id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.doc_id, self.relevance, self.rating
        )
    }
}

/// Order by descending relevance, break near-ties by descending rating, keep
/// the first `limit`.
///
/// Near-ties are resolved on runs of neighbours whose relevances differ by
/// less than [`RELEVANCE_EPSILON`], which keeps the comparator a total order.
pub fn rank_documents(mut documents: Vec<ScoredDocument>, limit: usize) -> Vec<ScoredDocument> {
    documents.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.rating.cmp(&a.rating))
    });

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < RELEVANCE_EPSILON
        {
            end += 1;
        }
        if end - start > 1 {
            documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        }
        start = end;
    }

    documents.truncate(limit);
    documents
}
