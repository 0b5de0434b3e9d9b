use std::fmt;
use crate::core::types::{DocId, DocumentStatus};

/// Caller-supplied document predicate over `(id, status, rating)`.
pub type DocumentPredicate<'f> = &'f (dyn Fn(DocId, DocumentStatus, i32) -> bool + Sync);

/// Which documents a search may return. Minus terms still veto regardless.
#[derive(Clone, Copy)]
pub enum DocumentFilter<'f> {
    Status(DocumentStatus),
    Predicate(DocumentPredicate<'f>),
}

impl Default for DocumentFilter<'_> {
    fn default() -> Self {
        DocumentFilter::Status(DocumentStatus::Actual)
    }
}

impl fmt::Debug for DocumentFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentFilter::Status(status) => f.debug_tuple("Status").field(status).finish(),
            DocumentFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<DocumentStatus> for DocumentFilter<'_> {
    fn from(status: DocumentStatus) -> Self {
        DocumentFilter::Status(status)
    }
}
