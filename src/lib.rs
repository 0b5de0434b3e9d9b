pub mod core;
pub mod analysis;
pub mod query;
pub mod index;
pub mod scoring;
pub mod search;
pub mod parallel;

pub use crate::core::config::Config;
pub use crate::core::engine::SearchEngine;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{DocId, DocumentStatus, ExecutionPolicy};
pub use crate::parallel::batch::{process_queries, process_queries_joined, BatchProcessor};
pub use crate::search::filter::DocumentFilter;
pub use crate::search::paginator::{paginate, Paginator};
pub use crate::search::request_queue::RequestQueue;
pub use crate::search::results::ScoredDocument;

/*
┌──────────────────────────────── QUILLSEARCH LAYOUT ────────────────────────────────┐
│                                                                                    │
│   RequestQueue ──┐                                   ┌── BatchProcessor (rayon)    │
│   (ring window)  │  &SearchEngine        &SearchEngine│   process_queries[_joined] │
│                  ▼                                   ▼                             │
│   ┌────────────────────────────── SearchEngine ─────────────────────────────┐      │
│   │ config: Config            analyzer: Analyzer (split + validate + stop)  │      │
│   │ scorer: TfIdfScorer       index: TermIndex                              │      │
│   │ documents: DocId → DocumentData { rating, status, text: Arc<str> }      │      │
│   │ document_ids: BTreeSet<DocId>                                           │      │
│   └─────────────────────────────────────────────────────────────────────────┘      │
│                                                                                    │
│   TermIndex                                                                        │
│     inverted: Arc<str> → { DocId → tf }     (scoring, sequential matching)         │
│     forward:  DocId → { Arc<str> → tf }     (removal, parallel matching)           │
│     each term allocated once, shared by both maps                                  │
│                                                                                    │
│   QueryParser → Query { plus_terms, minus_terms }   sorted + deduplicated          │
│   ConcurrentMap (parking_lot buckets) → parallel score accumulation                │
│   rank_documents → relevance desc, rating on near-ties, top 5                      │
└────────────────────────────────────────────────────────────────────────────────────┘
*/
