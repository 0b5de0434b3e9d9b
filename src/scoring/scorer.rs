/// TF-IDF Scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        TfIdfScorer
    }

    /// IDF = ln(total documents / documents containing the term)
    pub fn idf(&self, total_docs: usize, doc_freq: usize) -> f64 {
        (total_docs as f64 / doc_freq as f64).ln()
    }

    /// TF-IDF = TF * IDF
    pub fn score(&self, tf: f64, idf: f64) -> f64 {
        tf * idf
    }
}
