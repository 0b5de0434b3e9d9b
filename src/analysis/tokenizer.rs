use std::iter::FusedIterator;

/// Term separator. Tabs and newlines are control characters, so they stay
/// inside a term and fail validation instead of splitting.
const SEPARATOR: char = ' ';

/// Lazy iterator over the space-separated terms of a text.
///
/// A clone continues independently from the same position, so cloning
/// before consuming walks the text twice.
#[derive(Debug, Clone)]
pub struct Terms<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> Iterator for Terms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.by_ref().find(|term| !term.is_empty())
    }
}

impl FusedIterator for Terms<'_> {}

/// Split text into terms, skipping empty runs between separators.
pub fn split_into_terms(text: &str) -> Terms<'_> {
    Terms {
        inner: text.split(SEPARATOR),
    }
}

/// A term is valid if it holds no control characters (code points below ' ').
pub fn is_valid_term(term: &str) -> bool {
    !term.chars().any(|c| c < ' ')
}
