//! Concurrency tests for the record store.

use jsondb_core::{Config, RecordStore};
use jsondb_testkit::prelude::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn shared_store(sync_writes: bool) -> (TempDir, Arc<RecordStore>) {
    let temp_dir = TempDir::new().unwrap();
    let store =
        RecordStore::open_with_config(temp_dir.path(), Config::new().sync_writes(sync_writes))
            .unwrap();
    (temp_dir, Arc::new(store))
}

#[test]
fn readers_never_observe_torn_documents() {
    init_test_logging();
    let (_temp_dir, store) = shared_store(false);
    let config = StressConfig {
        operations: 200,
        threads: 4,
        payload_size: 64 * 1024,
        resource_count: 1,
    };

    let result = stress_read_during_writes(Arc::clone(&store), &config);
    result.print_summary("read during writes");

    assert!(result.successful_ops >= config.threads);
    assert_eq!(result.failed_ops, 0);

    let last: StressDoc = store.read("storm", "hot").unwrap();
    assert!(last.is_intact(config.payload_size));
}

#[test]
fn concurrent_writers_to_one_collection_all_land() {
    let (_temp_dir, store) = shared_store(false);
    let config = StressConfig {
        operations: 100,
        threads: 8,
        payload_size: 512,
        resource_count: 25,
    };

    let result = stress_concurrent_writes(Arc::clone(&store), &config);
    assert_eq!(result.failed_ops, 0);
    assert_eq!(result.successful_ops, 800);

    let docs: Vec<StressDoc> = store.read_all_as("concurrent").unwrap();
    assert_eq!(docs.len(), 8 * 25);
    assert!(docs.iter().all(|doc| doc.is_intact(config.payload_size)));
}

#[test]
fn writers_on_different_collections_proceed_in_parallel() {
    let (_temp_dir, store) = shared_store(true);
    let config = StressConfig {
        operations: 40,
        threads: 4,
        payload_size: 128,
        resource_count: 10,
    };

    let result = stress_parallel_collections(Arc::clone(&store), &config);
    assert_eq!(result.failed_ops, 0);

    for t in 0..config.threads {
        let docs: Vec<StressDoc> = store.read_all_as(&format!("collection_{t}")).unwrap();
        assert_eq!(docs.len(), config.resource_count);
        assert!(docs.iter().all(|doc| doc.writer == t));
    }
}

#[test]
fn write_and_delete_on_one_collection_serialize() {
    let (_temp_dir, store) = shared_store(false);
    let person = sample_person("churn");

    let writer = {
        let store = Arc::clone(&store);
        let person = person.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                store.write("people", "churn", &person).unwrap();
            }
        })
    };
    let deleter = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut deleted = 0;
            for _ in 0..200 {
                match store.delete("people", "churn") {
                    Ok(()) => deleted += 1,
                    Err(err) => assert!(err.is_not_found(), "unexpected error: {err}"),
                }
            }
            deleted
        })
    };

    writer.join().unwrap();
    let _deleted = deleter.join().unwrap();

    // Whatever interleaving happened, the collection is either empty or
    // holds one complete document.
    let docs: Vec<Person> = store.read_all_as("people").unwrap();
    assert!(docs.len() <= 1);
    if let Some(doc) = docs.first() {
        assert_eq!(doc, &person);
    }
}
