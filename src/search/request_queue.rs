use tracing::trace;
use crate::core::engine::SearchEngine;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentStatus};
use crate::search::results::ScoredDocument;

/// Fixed-capacity ring of request outcomes with a running count of the
/// requests that found nothing.
#[derive(Debug, Clone)]
pub struct RequestWindow {
    slots: Vec<bool>,     // true = request returned no documents
    capacity: usize,
    head: usize,          // Oldest slot once the ring is full
    no_result_count: usize,
    elapsed: u64,         // Requests recorded since creation
}

impl RequestWindow {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_argument("Request window must hold at least one request"));
        }
        Ok(RequestWindow {
            slots: Vec::new(),
            capacity,
            head: 0,
            no_result_count: 0,
            elapsed: 0,
        })
    }

    pub fn record(&mut self, no_results: bool) {
        self.elapsed += 1;

        if self.slots.len() < self.capacity {
            self.slots.push(no_results);
        } else {
            let evicted = std::mem::replace(&mut self.slots[self.head], no_results);
            if evicted {
                self.no_result_count -= 1;
            }
            self.head = (self.head + 1) % self.slots.len();
        }

        if no_results {
            self.no_result_count += 1;
        }
    }

    pub fn no_result_count(&self) -> usize {
        self.no_result_count
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}

/// Runs searches against a borrowed engine and tracks how many of the most
/// recent ones came back empty.
pub struct RequestQueue<'e> {
    engine: &'e SearchEngine,
    window: RequestWindow,
}

impl<'e> RequestQueue<'e> {
    pub fn new(engine: &'e SearchEngine) -> Result<Self> {
        RequestQueue::with_window(engine, engine.config().request_window)
    }

    pub fn with_window(engine: &'e SearchEngine, window: usize) -> Result<Self> {
        Ok(RequestQueue {
            engine,
            window: RequestWindow::new(window)?,
        })
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let results = self.engine.find_top_documents(raw_query)?;
        Ok(self.record(raw_query, results))
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let results = self.engine.find_top_documents_by_status(raw_query, status)?;
        Ok(self.record(raw_query, results))
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let results = self.engine.find_top_documents_by(raw_query, predicate)?;
        Ok(self.record(raw_query, results))
    }

    /// Requests within the window that returned no documents.
    pub fn get_no_result_request_count(&self) -> usize {
        self.window.no_result_count()
    }

    pub fn get_total_request_count(&self) -> u64 {
        self.window.elapsed()
    }

    fn record(&mut self, raw_query: &str, results: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        self.window.record(results.is_empty());
        trace!(
            query = raw_query,
            hits = results.len(),
            no_result_requests = self.window.no_result_count(),
            "request recorded"
        );
        results
    }
}
