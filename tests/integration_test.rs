// Integration tests for semvec
use semvec::prelude::*;
use semvec::ProgressReporter;
use std::path::Path;

fn term_space() -> TermVectorStore {
    let mut terms = TermVectorStore::new(4);
    terms.insert("a", Vector::new(vec![1.0, 0.0, 0.0, 0.0]));
    terms.insert("b", Vector::new(vec![0.0, 1.0, 0.0, 0.0]));
    terms
}

fn three_doc_corpus() -> InMemoryCorpus {
    InMemoryCorpus::new(vec![
        CorpusDocument::new()
            .with_field("path", "doc1")
            .with_terms("contents", [("a", 2)]),
        CorpusDocument::new()
            .with_field("path", "doc2")
            .with_terms("contents", [("a", 1), ("b", 1)]),
        CorpusDocument::new().with_field("path", "doc3"),
    ])
}

fn read_all(path: &Path) -> (usize, Vec<(String, Vector)>) {
    let reader = DocVectorReader::open(path).unwrap();
    let dimension = reader.dimension();
    let records = reader.collect::<Result<Vec<_>>>().unwrap();
    (dimension, records)
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-3, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn test_three_document_scenario() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("docvectors.bin");
    let config = DocVectorConfig::new(&output, 4);

    let terms = term_space();
    let corpus = three_doc_corpus();
    let stats = DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(stats.documents, 3);

    let (dimension, records) = read_all(&output);
    assert_eq!(dimension, 4);
    let ids: Vec<&str> = records.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["doc1", "doc2", "doc3"]);

    assert_close(records[0].1.as_slice(), &[1.0, 0.0, 0.0, 0.0]);
    assert_close(records[1].1.as_slice(), &[0.707, 0.707, 0.0, 0.0]);
    assert_close(records[2].1.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_record_count_matches_document_count_for_many_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("docvectors.bin");
    let config = DocVectorConfig::new(&output, 4).with_fields(["title", "abstract", "contents"]);

    let corpus = InMemoryCorpus::new(
        (0..5)
            .map(|i| {
                CorpusDocument::new()
                    .with_terms("title", [("a", 1)])
                    .with_terms("abstract", [("b", i + 1)])
                    .with_terms("contents", [("a", 1), ("b", 1)])
            })
            .collect(),
    );
    let terms = term_space();

    DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build()
        .unwrap();

    let (_, records) = read_all(&output);
    assert_eq!(records.len(), 5);
    let ids: Vec<String> = records.into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn test_unknown_terms_do_not_change_vectors() {
    let temp_dir = tempfile::tempdir().unwrap();
    let terms = term_space();

    let with_gap = InMemoryCorpus::new(vec![CorpusDocument::new()
        .with_terms("contents", [("a", 1), ("zzz", 9), ("b", 3)])]);
    let without_gap = InMemoryCorpus::new(vec![CorpusDocument::new()
        .with_terms("contents", [("a", 1), ("b", 3)])]);

    let out_gap = temp_dir.path().join("gap.bin");
    let out_clean = temp_dir.path().join("clean.bin");

    let stats = DocVectorBuilder::new(&DocVectorConfig::new(&out_gap, 4), &terms, &with_gap)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(stats.skipped_terms, 1);
    DocVectorBuilder::new(&DocVectorConfig::new(&out_clean, 4), &terms, &without_gap)
        .unwrap()
        .build()
        .unwrap();

    let (_, gap) = read_all(&out_gap);
    let (_, clean) = read_all(&out_clean);
    assert_eq!(gap[0].1, clean[0].1);
}

#[test]
fn test_log_entropy_weighting() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("docvectors.bin");
    let config = DocVectorConfig::new(&output, 4).with_term_weight(TermWeight::LogEntropy);

    // "a" appears evenly in both documents (entropy weight 0), "b" only in the first
    let corpus = InMemoryCorpus::new(vec![
        CorpusDocument::new()
            .with_field("path", "first")
            .with_terms("contents", [("a", 1), ("b", 1)]),
        CorpusDocument::new()
            .with_field("path", "second")
            .with_terms("contents", [("a", 1)]),
    ]);
    let terms = term_space();

    DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build()
        .unwrap();

    let (_, records) = read_all(&output);
    assert_close(records[0].1.as_slice(), &[0.0, 1.0, 0.0, 0.0]);
    assert!(records[1].1.is_zero());
}

#[test]
fn test_round_trip_through_writer_and_reader() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("roundtrip.bin");
    let vectors = vec![
        ("résumé.txt".to_string(), Vector::new(vec![0.1, -0.2, 0.3])),
        ("".to_string(), Vector::new(vec![0.0, 0.0, 0.0])),
        ("dir/b.txt".to_string(), Vector::new(vec![1e-7, 3.25, -1e6])),
    ];

    let mut writer = DocVectorWriter::create(&path).unwrap();
    writer.write_header(3).unwrap();
    for (id, v) in &vectors {
        writer.write_record(id, v).unwrap();
    }
    assert_eq!(writer.finish().unwrap(), 3);

    let (dimension, records) = read_all(&path);
    assert_eq!(dimension, 3);
    assert_eq!(records, vectors);
}

#[test]
fn test_document_vectors_support_similarity_search() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("docvectors.bin");
    let config = DocVectorConfig::new(&output, 4);

    let terms = term_space();
    let corpus = three_doc_corpus();
    DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build()
        .unwrap();

    let (_, records) = read_all(&output);
    let query = terms.get("a").unwrap();
    let best = records
        .iter()
        .max_by(|x, y| {
            query
                .cosine_similarity(&x.1)
                .total_cmp(&query.cosine_similarity(&y.1))
        })
        .unwrap();
    assert_eq!(best.0, "doc1");
}

#[test]
fn test_term_vectors_from_file_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    let term_path = temp_dir.path().join("termvectors.bin");
    let corpus_path = temp_dir.path().join("corpus.json");
    let output = temp_dir.path().join("docvectors.bin");

    let mut writer = DocVectorWriter::create(&term_path).unwrap();
    writer.write_header(2).unwrap();
    writer.write_record("cat", &Vector::new(vec![1.0, 0.0])).unwrap();
    writer.write_record("dog", &Vector::new(vec![0.0, 1.0])).unwrap();
    writer.finish().unwrap();

    std::fs::write(
        &corpus_path,
        r#"{"documents": [
            {"fields": {"id": "pets"}, "terms": {"body": [["cat", 3], ["dog", 3], ["fish", 1]]}},
            {"fields": {"id": "none"}, "terms": {"body": []}}
        ]}"#,
    )
    .unwrap();

    let terms = load_term_vectors(&term_path).unwrap();
    let corpus = load_corpus(&corpus_path).unwrap();
    let config = DocVectorConfig::new(&output, terms.dimension())
        .with_fields(["body"])
        .with_doc_id_field("id");

    let mut milestones = 0;
    let mut progress = |_: usize| milestones += 1;
    let stats = DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build_with_progress(&mut progress as &mut dyn ProgressReporter)
        .unwrap();
    assert_eq!(stats.documents, 2);
    assert_eq!(milestones, 0);

    let (_, records) = read_all(&output);
    assert_eq!(records[0].0, "pets");
    assert_close(records[0].1.as_slice(), &[0.707, 0.707]);
    assert_eq!(records[1].0, "none");
    assert!(records[1].1.is_zero());
}

#[test]
fn test_failed_build_leaves_no_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("no_such_dir").join("docvectors.bin");
    let config = DocVectorConfig::new(&output, 4);

    let terms = term_space();
    let corpus = three_doc_corpus();
    let err = DocVectorBuilder::new(&config, &terms, &corpus)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Output { .. }));
    assert!(!output.exists());
}
