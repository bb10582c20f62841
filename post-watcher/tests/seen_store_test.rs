mod common;

use common::init_tracing;
use post_watcher::traits::SeenBackend;
use post_watcher::{JsonFileBackend, MemoryBackend, SeenStore};
use std::fs;

#[test]
fn test_missing_file_starts_empty() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seen.json");
    let backend = JsonFileBackend::new(&path);

    assert_eq!(backend.describe(), path.display().to_string());
    assert!(backend.load().unwrap().is_none());
    let store = SeenStore::load(Box::new(backend));
    assert!(store.is_empty());
}

#[test]
fn test_insert_persists_full_set() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seen.json");

    let mut store = SeenStore::load(Box::new(JsonFileBackend::new(&path)));
    assert!(store.insert("b2"));
    assert!(store.insert("a1"));
    assert!(!store.insert("a1"));

    let saved: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, vec!["a1", "b2"]);
    assert!(!dir.path().join("seen.json.tmp").exists());

    let reloaded = SeenStore::load(Box::new(JsonFileBackend::new(&path)));
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains("a1"));
    assert!(reloaded.contains("b2"));
}

#[test]
fn test_parent_directory_is_created() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("state").join("seen.json");

    let mut store = SeenStore::load(Box::new(JsonFileBackend::new(&path)));
    store.insert("abc123");

    assert!(path.exists());
}

#[test]
fn test_corrupt_file_starts_empty() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seen.json");
    fs::write(&path, "{not json").unwrap();

    let backend = JsonFileBackend::new(&path);
    assert!(backend.load().is_err());

    let mut store = SeenStore::load(Box::new(backend));
    assert!(store.is_empty());

    // The next insertion replaces the broken file
    store.insert("abc123");
    let saved: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, vec!["abc123"]);
}

#[test]
fn test_failed_persist_keeps_id_in_memory() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes every write fail
    let path = dir.path().join("seen.json");
    fs::create_dir(&path).unwrap();

    let mut store = SeenStore::load(Box::new(JsonFileBackend::new(&path)));
    assert!(store.insert("abc123"));
    assert!(store.contains("abc123"));
}

#[test]
fn test_memory_backend() {
    let backend = MemoryBackend::default();
    assert!(backend.load().unwrap().is_none());

    let store = SeenStore::load(Box::new(MemoryBackend::with_ids(vec!["x1".to_string()])));
    assert!(store.contains("x1"));
    assert!(!store.contains("x2"));
}
