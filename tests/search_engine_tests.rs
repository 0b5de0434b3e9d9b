use quillsearch::{DocId, DocumentFilter, DocumentStatus, ErrorKind, ExecutionPolicy, SearchEngine};
use quillsearch::search::results::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

fn pet_engine() -> SearchEngine {
    let mut engine = SearchEngine::from_stop_words_text("and in on with").unwrap();
    engine.add_document(DocId(0), "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
    engine.add_document(DocId(1), "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    engine.add_document(DocId(2), "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    engine.add_document(DocId(3), "groomed starling evgeny", DocumentStatus::Banned, &[9]).unwrap();
    engine
}

fn ids(results: &[quillsearch::ScoredDocument]) -> Vec<i64> {
    results.iter().map(|doc| doc.doc_id.0).collect()
}

#[test]
fn stop_words_are_excluded_from_indexing() {
    let content = "cat in the city";

    let mut engine = SearchEngine::with_stop_words(Vec::<String>::new()).unwrap();
    engine.add_document(DocId(42), content, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    let found = engine.find_top_documents("in").unwrap();
    assert_eq!(ids(&found), vec![42]);

    let mut engine = SearchEngine::from_stop_words_text("in the").unwrap();
    engine.add_document(DocId(42), content, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    assert!(engine.find_top_documents("in").unwrap().is_empty());
    assert!(engine.get_word_frequencies(DocId(42)).get("in").is_none());
}

#[test]
fn finds_documents_containing_query_terms() {
    let engine = pet_engine();
    assert_eq!(engine.find_top_documents("white cat").unwrap().len(), 2);
    assert_eq!(engine.find_top_documents("fluffy tail").unwrap().len(), 1);
    assert!(engine.find_top_documents("dancing kittens").unwrap().is_empty());
}

#[test]
fn minus_terms_veto_documents() {
    let engine = pet_engine();
    assert_eq!(ids(&engine.find_top_documents("cat -collar").unwrap()), vec![1]);
    assert!(engine.find_top_documents("cat -cat").unwrap().is_empty());

    // veto applies even when the filter would accept the document
    let found = engine.find_top_documents_by("groomed -evgeny", |_, _, _| true).unwrap();
    assert_eq!(ids(&found), vec![2]);
}

#[test]
fn minus_term_absent_from_index_changes_nothing() {
    let engine = pet_engine();
    let with_minus = engine.find_top_documents("cat -unicorn").unwrap();
    let without = engine.find_top_documents("cat").unwrap();
    assert_eq!(with_minus, without);
}

#[test]
fn relevance_is_tf_idf() {
    let mut engine = SearchEngine::with_stop_words(Vec::<String>::new()).unwrap();
    engine.add_document(DocId(0), "white cat with new collar", DocumentStatus::Actual, &[1, 4, 4]).unwrap();
    engine.add_document(DocId(1), "fluffy cat fluffy tail", DocumentStatus::Actual, &[-8, 3, 7]).unwrap();
    engine.add_document(DocId(2), "good dog big eyes", DocumentStatus::Actual, &[2, -9, 12]).unwrap();

    let found = engine.find_top_documents("fluffy good cat").unwrap();
    let expected = (3.0f64).ln() * (2.0 / 4.0) + (3.0f64 / 2.0).ln() * (1.0 / 4.0);

    assert_eq!(found[0].doc_id, DocId(1));
    assert!((found[0].relevance - expected).abs() < 1e-6);
    assert_eq!(found.len(), 3);
}

#[test]
fn fluffy_cat_ranks_fluffy_document_first() {
    let mut engine = SearchEngine::from_stop_words_text("and").unwrap();
    engine.add_document(DocId(0), "white cat and fancy collar", DocumentStatus::Actual, &[2, 3, -8]).unwrap();
    engine.add_document(DocId(1), "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    engine.add_document(DocId(2), "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();

    let found = engine.find_top_documents("fluffy cat").unwrap();
    assert_eq!(ids(&found), vec![1, 0]);

    let idf_cat = (3.0f64 / 2.0).ln();
    let idf_fluffy = (3.0f64).ln();
    assert!((found[0].relevance - (idf_fluffy * 0.5 + idf_cat * 0.25)).abs() < 1e-12);
    assert!((found[1].relevance - idf_cat * 0.25).abs() < 1e-12);
}

#[test]
fn results_are_ordered_and_capped() {
    let mut engine = SearchEngine::with_stop_words(Vec::<String>::new()).unwrap();
    for id in 0..12 {
        let text = format!("common {}", "rare ".repeat(id as usize % 4));
        engine.add_document(DocId(id), &text, DocumentStatus::Actual, &[id as i32]).unwrap();
    }

    let found = engine.find_top_documents("common rare").unwrap();
    assert_eq!(found.len(), MAX_RESULT_DOCUMENT_COUNT);
    for pair in found.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON {
            assert!(a.rating >= b.rating);
        } else {
            assert!(a.relevance > b.relevance);
        }
    }
}

#[test]
fn equal_relevance_falls_back_to_rating() {
    let mut engine = SearchEngine::with_stop_words(Vec::<String>::new()).unwrap();
    engine.add_document(DocId(0), "cat", DocumentStatus::Actual, &[1]).unwrap();
    engine.add_document(DocId(1), "cat", DocumentStatus::Actual, &[9]).unwrap();
    engine.add_document(DocId(2), "cat", DocumentStatus::Actual, &[5]).unwrap();
    engine.add_document(DocId(3), "dog", DocumentStatus::Actual, &[0]).unwrap();

    assert_eq!(ids(&engine.find_top_documents("cat").unwrap()), vec![1, 2, 0]);
}

#[test]
fn rating_is_truncated_average() {
    let mut engine = SearchEngine::from_stop_words_text("and in on").unwrap();
    engine.add_document(DocId(0), "night pass dyatlov", DocumentStatus::Actual, &[1, 4, 4]).unwrap();
    engine.add_document(DocId(1), "bear search in forest", DocumentStatus::Actual, &[-8, 3, 7]).unwrap();
    engine.add_document(DocId(2), "night hunt and fishing", DocumentStatus::Actual, &[-4, 5, 3]).unwrap();
    engine.add_document(DocId(3), "no ratings here", DocumentStatus::Actual, &[]).unwrap();

    let ratings = |query: &str| -> Vec<i32> {
        engine.find_top_documents(query).unwrap().iter().map(|d| d.rating).collect()
    };
    assert_eq!(ratings("dyatlov"), vec![3]);
    assert_eq!(ratings("bear"), vec![0]);
    assert_eq!(ratings("fishing"), vec![1]);
    assert_eq!(ratings("ratings"), vec![0]);
}

#[test]
fn filters_by_status_and_predicate() {
    let engine = pet_engine();

    let banned = engine.find_top_documents_by_status("groomed", DocumentStatus::Banned).unwrap();
    assert_eq!(ids(&banned), vec![3]);

    let actual = engine.find_top_documents("groomed").unwrap();
    assert_eq!(ids(&actual), vec![2]);

    let even = engine.find_top_documents_by("fluffy groomed cat", |id, _, _| id.0 % 2 == 0).unwrap();
    assert_eq!(even.len(), 2);
    assert!(even.iter().all(|doc| doc.doc_id.0 % 2 == 0));

    let rated = engine.find_top_documents_by("cat groomed", |_, _, rating| rating > 2).unwrap();
    assert_eq!(ids(&rated), vec![3, 1]);
}

#[test]
fn find_with_filter_enum_matches_overloads() {
    let engine = pet_engine();
    let by_status = engine.find_top_documents_by_status("groomed", DocumentStatus::Banned).unwrap();
    let via_enum = engine
        .find_top_documents_with(ExecutionPolicy::Sequential, "groomed", DocumentStatus::Banned.into())
        .unwrap();
    assert_eq!(by_status, via_enum);

    let predicate = |_: DocId, status: DocumentStatus, _: i32| status != DocumentStatus::Banned;
    let via_predicate = engine
        .find_top_documents_with(ExecutionPolicy::Sequential, "groomed", DocumentFilter::Predicate(&predicate))
        .unwrap();
    assert_eq!(ids(&via_predicate), vec![2]);
}

#[test]
fn parallel_ranking_matches_sequential() {
    let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
    let words = ["cat", "dog", "tail", "collar", "eyes", "fluffy", "white", "groomed"];
    for id in 0..60i64 {
        let text: Vec<&str> = (0..6).map(|k| words[((id * 7 + k * 3) % 8) as usize]).collect();
        let status = if id % 5 == 0 { DocumentStatus::Irrelevant } else { DocumentStatus::Actual };
        engine.add_document(DocId(id), &text.join(" "), status, &[id as i32 % 11 - 5]).unwrap();
    }

    let positive = |_: DocId, _: DocumentStatus, rating: i32| rating > 0;
    let filters = [
        DocumentFilter::default(),
        DocumentFilter::Status(DocumentStatus::Irrelevant),
        DocumentFilter::Predicate(&positive),
    ];

    for query in ["cat tail", "fluffy -dog", "groomed eyes white -collar", "nothing here"] {
        for filter in &filters {
            let sequential = engine
                .find_top_documents_with(ExecutionPolicy::Sequential, query, *filter)
                .unwrap();
            let parallel = engine
                .find_top_documents_with(ExecutionPolicy::Parallel, query, *filter)
                .unwrap();
            assert_eq!(sequential.len(), parallel.len(), "query {:?}, filter {:?}", query, filter);
            for (s, p) in sequential.iter().zip(&parallel) {
                assert_eq!(s.doc_id, p.doc_id, "query {:?}, filter {:?}", query, filter);
                assert!((s.relevance - p.relevance).abs() < 1e-9);
                assert_eq!(s.rating, p.rating);
            }
        }
    }
}

#[test]
fn invalid_documents_are_rejected() {
    let mut engine = pet_engine();
    let err = engine.add_document(DocId(-1), "negative", DocumentStatus::Actual, &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = engine.add_document(DocId(1), "duplicate", DocumentStatus::Actual, &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = engine.add_document(DocId(8), "big dog sk\u{12}ворец", DocumentStatus::Actual, &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    assert_eq!(engine.get_document_count(), 4);
}

#[test]
fn malformed_queries_are_rejected() {
    let engine = pet_engine();
    for query in ["-", "cat -", "--cat", "fluffy --tail", "ca\u{1}t"] {
        let err = engine.find_top_documents(query).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument, "query {:?}", query);
    }
}

#[test]
fn invalid_stop_words_are_rejected() {
    let err = SearchEngine::with_stop_words(["and", "i\u{5}n"]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
}

#[test]
fn matching_reports_present_plus_terms() {
    let engine = pet_engine();

    let (terms, status) = engine.match_document("fluffy cat dog", DocId(1)).unwrap();
    assert_eq!(terms, vec!["cat", "fluffy"]);
    assert_eq!(status, DocumentStatus::Actual);

    let (terms, status) = engine.match_document("groomed -evgeny", DocId(3)).unwrap();
    assert!(terms.is_empty());
    assert_eq!(status, DocumentStatus::Banned);

    let (terms, _) = engine.match_document("cat cat and collar", DocId(0)).unwrap();
    assert_eq!(terms, vec!["cat", "collar"]);
}

#[test]
fn matching_unknown_or_negative_id_fails() {
    let engine = pet_engine();
    for id in [-1, 99] {
        let err = engine.match_document("cat", DocId(id)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}

#[test]
fn parallel_matching_is_identical() {
    let engine = pet_engine();
    let queries = [
        "fluffy cat dog",
        "cat cat fluffy fluffy tail",
        "groomed -evgeny",
        "white -dog collar",
        "and in on",
        "",
    ];
    for doc_id in &engine {
        for query in queries {
            let sequential = engine.match_document(query, doc_id).unwrap();
            let parallel = engine.match_document_with(ExecutionPolicy::Parallel, query, doc_id).unwrap();
            assert_eq!(sequential, parallel, "doc {} query {:?}", doc_id, query);
        }
    }

    let err = engine.match_document_with(ExecutionPolicy::Parallel, "--cat", DocId(0)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
}

#[test]
fn word_frequencies_of_known_and_unknown_documents() {
    let engine = pet_engine();
    let frequencies = engine.get_word_frequencies(DocId(1));
    assert_eq!(frequencies.len(), 3);
    assert_eq!(frequencies.get("fluffy"), Some(&0.5));
    assert_eq!(frequencies.get("tail"), Some(&0.25));

    assert!(engine.get_word_frequencies(DocId(404)).is_empty());
}

#[test]
fn removal_is_idempotent_and_readding_works() {
    let mut engine = pet_engine();
    let fresh = pet_engine();

    engine.remove_document(DocId(404));
    assert_eq!(engine.get_document_count(), 4);

    engine.remove_document(DocId(1));
    engine.remove_document(DocId(1));
    assert_eq!(engine.get_document_count(), 3);
    assert!(engine.get_word_frequencies(DocId(1)).is_empty());
    assert!(engine.find_top_documents("fluffy").unwrap().is_empty());

    engine.add_document(DocId(1), "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    for query in ["fluffy cat", "groomed", "white -tail"] {
        assert_eq!(engine.find_top_documents(query).unwrap(), fresh.find_top_documents(query).unwrap());
    }
    assert_eq!(engine.get_word_frequencies(DocId(1)), fresh.get_word_frequencies(DocId(1)));
}

#[test]
fn removal_changes_idf_of_remaining_documents() {
    let mut engine = pet_engine();
    let before = engine.find_top_documents("cat").unwrap();
    engine.remove_document_with(ExecutionPolicy::Parallel, DocId(2));
    let after = engine.find_top_documents("cat").unwrap();

    assert_eq!(ids(&before), ids(&after));
    assert!(after[0].relevance < before[0].relevance);
}

#[test]
fn positional_lookup_and_iteration() {
    let mut engine = SearchEngine::with_stop_words(Vec::<String>::new()).unwrap();
    for id in [5, 1, 3] {
        engine.add_document(DocId(id), "text", DocumentStatus::Actual, &[]).unwrap();
    }

    assert_eq!(engine.get_document_count(), 3);
    assert_eq!(engine.get_document_id_at(0).unwrap(), DocId(1));
    assert_eq!(engine.get_document_id_at(2).unwrap(), DocId(5));
    assert_eq!(engine.get_document_id_at(3).unwrap_err().kind, ErrorKind::OutOfRange);

    let collected: Vec<DocId> = engine.document_ids().collect();
    assert_eq!(collected, vec![DocId(1), DocId(3), DocId(5)]);
    assert_eq!(engine.get_document_text(DocId(3)), Some("text"));
}
