use rayon::prelude::*;
use tracing::debug;
use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::search::results::ScoredDocument;

/// Runs many independent searches against one engine on a dedicated pool.
///
/// The engine is only borrowed for the duration of a call, so it cannot be
/// mutated while a batch is running.
pub struct BatchProcessor {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl BatchProcessor {
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("quill-batch-{}", idx))
            .build()?;

        Ok(BatchProcessor { workers, pool })
    }

    /// Pool sized from the engine's config.
    pub fn for_engine(engine: &SearchEngine) -> Result<Self> {
        BatchProcessor::new(engine.config().batch_workers)
    }

    /// Threads in the pool; requests for zero workers are raised to one.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// One result set per query, in query order. A failing query only fails
    /// its own entry.
    pub fn process_queries<S>(&self, engine: &SearchEngine, queries: &[S]) -> Vec<Result<Vec<ScoredDocument>>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(queries = queries.len(), workers = self.workers, "processing query batch");
        self.pool.install(|| process_queries(engine, queries))
    }

    pub fn process_queries_joined<S>(&self, engine: &SearchEngine, queries: &[S]) -> Result<Vec<ScoredDocument>>
    where
        S: AsRef<str> + Sync,
    {
        join_results(self.process_queries(engine, queries))
    }
}

/// [`BatchProcessor::process_queries`] on the global rayon pool.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Vec<Result<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query.as_ref()))
        .collect()
}

/// All results flattened in query order; fails with the first failing query.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    join_results(process_queries(engine, queries))
}

fn join_results(per_query: Vec<Result<Vec<ScoredDocument>>>) -> Result<Vec<ScoredDocument>> {
    let mut joined = Vec::new();
    for results in per_query {
        joined.extend(results?);
    }
    Ok(joined)
}
