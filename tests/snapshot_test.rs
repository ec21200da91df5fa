//! Snapshot persistence and registry behavior.

use std::sync::Arc;

use tempfile::TempDir;

use crocus::{
    CategoryOptions, CrocusError, Index, IndexWriter, Indexes, Record, Schema, SearchRequest,
};

fn build_index() -> Index {
    let schema = Schema::builder("books")
        .category("title", CategoryOptions::new())
        .build()
        .unwrap();
    let mut writer = IndexWriter::new(schema);
    writer.add(Record::new(1).set("title", "persisted hello"));
    writer.add(Record::new(2).set("title", "hello again"));
    writer.commit()
}

#[test]
fn test_save_and_load_round_trip() -> crocus::Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.json");

    // 1. Build and persist.
    let index = build_index();
    index.save(&path)?;

    // 2. Load and query: results must match the in-memory snapshot.
    let loaded = Index::load(&path)?;
    assert_eq!(loaded.name(), "books");
    assert_eq!(
        loaded.search(SearchRequest::new("hello")).ids,
        index.search(SearchRequest::new("hello")).ids,
    );
    Ok(())
}

#[test]
fn test_missing_snapshot_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let result = Index::load(temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(CrocusError::SnapshotMissing { .. })));
}

#[test]
fn test_corrupt_snapshot_surfaces_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(Index::load(&path), Err(CrocusError::Json(_))));
}

#[test]
fn test_registry_search_by_name() -> crocus::Result<()> {
    let indexes = Indexes::new();
    indexes.swap(build_index());

    let results = indexes.search("books", "hello", Some(1), None)?;
    assert_eq!(results.ids, vec![2]);

    assert!(matches!(
        indexes.search("nope", "hello", None, None),
        Err(CrocusError::UnknownIndex { .. })
    ));
    Ok(())
}

#[test]
fn test_swap_keeps_old_snapshot_alive_for_holders() {
    let indexes = Indexes::new();
    indexes.swap(build_index());
    let held: Arc<Index> = indexes.get("books").unwrap();

    // Rebuild with different content and swap it in.
    let schema = Schema::builder("books")
        .category("title", CategoryOptions::new())
        .build()
        .unwrap();
    let mut writer = IndexWriter::new(schema);
    writer.add(Record::new(99).set("title", "hello rebuilt"));
    indexes.swap(writer.commit());

    // The held snapshot still answers with the old corpus.
    assert_eq!(held.search(SearchRequest::new("hello")).ids, vec![2, 1]);
    // New lookups see the replacement.
    let fresh = indexes.get("books").unwrap();
    assert_eq!(fresh.search(SearchRequest::new("hello")).ids, vec![99]);
}
