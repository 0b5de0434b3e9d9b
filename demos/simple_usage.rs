/// Quillsearch API walkthrough
///
/// Demonstrates:
/// - Building an engine with stop words
/// - Adding, matching and removing documents
/// - Ranked search with status and predicate filters
/// - Request statistics, pagination and batch queries
///
/// Run with `RUST_LOG=quillsearch=debug` to see engine logging.

use quillsearch::{
    paginate, process_queries_joined, BatchProcessor, Config, DocId, DocumentStatus, ExecutionPolicy,
    RequestQueue, SearchEngine,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        Quillsearch - Complete API Demo        ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Create engine
    println!("Step 1: Creating engine...");
    let config = Config::default().with_stop_words(["and", "with", "in", "the"]);
    let mut engine = SearchEngine::new(config)?;
    println!("  Stop words: {}\n", engine.stop_words().len());

    // Step 2: Add documents
    println!("Step 2: Adding documents...");
    let documents = [
        (1, "white cat and fashionable collar", DocumentStatus::Actual, vec![8, -3]),
        (2, "fluffy cat fluffy tail", DocumentStatus::Actual, vec![7, 2, 7]),
        (3, "groomed dog expressive eyes", DocumentStatus::Actual, vec![5, -12, 2, 1]),
        (4, "groomed starling eugene", DocumentStatus::Banned, vec![9]),
        (5, "curly dog with fancy collar", DocumentStatus::Irrelevant, vec![1, 2, 3]),
    ];
    for (id, text, status, ratings) in &documents {
        engine.add_document(DocId(*id), text, *status, ratings)?;
    }
    println!("  Indexed {} documents\n", engine.get_document_count());

    // Step 3: Search
    println!("Step 3: Searching 'fluffy groomed cat'...");
    for doc in engine.find_top_documents("fluffy groomed cat")? {
        println!("  {}", doc);
    }

    println!("\n  Banned only:");
    for doc in engine.find_top_documents_by_status("fluffy groomed cat", DocumentStatus::Banned)? {
        println!("  {}", doc);
    }

    println!("\n  Even ids, parallel:");
    let even = |id: DocId, _: DocumentStatus, _: i32| id.value() % 2 == 0;
    let results = engine.find_top_documents_with(
        ExecutionPolicy::Parallel,
        "fluffy groomed cat",
        quillsearch::DocumentFilter::Predicate(&even),
    )?;
    for doc in results {
        println!("  {}", doc);
    }

    // Step 4: Matching
    println!("\nStep 4: Matching 'fluffy cat -collar'...");
    for doc_id in &engine {
        let (terms, status) = engine.match_document("fluffy cat -collar", doc_id)?;
        println!("  doc {} ({:?}): {:?}", doc_id, status, terms);
    }

    // Step 5: Request statistics
    println!("\nStep 5: Request statistics...");
    {
        let mut requests = RequestQueue::new(&engine)?;
        for _ in 0..1439 {
            requests.add_find_request("empty request")?;
        }
        requests.add_find_request("curly dog")?;
        requests.add_find_request("big collar")?;
        requests.add_find_request("starling")?;
        println!(
            "  {} of the last {} requests found nothing",
            requests.get_no_result_request_count(),
            engine.config().request_window
        );
    }

    // Step 6: Pagination
    println!("\nStep 6: Paginating 'curly dog collar' by 2...");
    let all = engine.find_top_documents_by("curly dog collar", |_, _, _| true)?;
    for page in paginate(&all, 2)?.iter() {
        println!("  {}", page);
        println!("  Page break");
    }

    // Step 7: Batch queries
    println!("\nStep 7: Batch queries...");
    let queries = ["fluffy cat", "groomed dog", "collar -white"];
    let processor = BatchProcessor::for_engine(&engine)?;
    for (query, result) in queries.iter().zip(processor.process_queries(&engine, &queries)) {
        println!("  '{}': {} results", query, result?.len());
    }
    let joined = process_queries_joined(&engine, &queries)?;
    println!("  joined: {} results", joined.len());

    // Step 8: Removal
    println!("\nStep 8: Removing document 2...");
    engine.remove_document_with(ExecutionPolicy::Parallel, DocId(2));
    println!("  Remaining: {}", engine.get_document_count());
    println!("  'fluffy' now finds {}", engine.find_top_documents("fluffy")?.len());

    println!("\nDone!");
    Ok(())
}
