/// Parsed query: terms that score and terms that veto.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_terms: Vec<&'a str>,   // Must appear, contribute to score
    pub minus_terms: Vec<&'a str>,  // Any match excludes the document
}

impl<'a> Query<'a> {
    pub fn new() -> Self {
        Query::default()
    }

    /// Sort and deduplicate both term sets.
    pub fn canonicalize(mut self) -> Self {
        self.plus_terms.sort_unstable();
        self.plus_terms.dedup();
        self.minus_terms.sort_unstable();
        self.minus_terms.dedup();
        self
    }
}

/// A single classified query term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTerm<'a> {
    pub text: &'a str,
    pub is_minus: bool,
    pub is_stop: bool,
}
