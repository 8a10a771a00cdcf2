//! Stress tests for jsondb.
//!
//! These helpers drive a store under heavy load and concurrent access and
//! report how many operations succeeded. A failed read in
//! [`stress_read_during_writes`] means a reader observed a torn or foreign
//! document.

use jsondb_core::RecordStore;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations to perform (per thread for concurrent tests).
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Approximate size of each document's payload in bytes.
    pub payload_size: usize,
    /// Number of distinct resources.
    pub resource_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 1_000,
            threads: 4,
            payload_size: 4_096,
            resource_count: 100,
        }
    }
}

/// Self-checking document written by the stress helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressDoc {
    /// Writer thread index.
    pub writer: usize,
    /// Per-writer sequence number.
    pub seq: usize,
    /// Filler derived from `writer` and `seq`.
    pub payload: String,
}

impl StressDoc {
    /// Builds the document `writer` produces at step `seq`.
    pub fn new(writer: usize, seq: usize, payload_size: usize) -> Self {
        Self {
            writer,
            seq,
            payload: Self::payload_for(writer, seq, payload_size),
        }
    }

    /// Returns true if the payload is exactly what `writer`/`seq` produce.
    pub fn is_intact(&self, payload_size: usize) -> bool {
        self.payload == Self::payload_for(self.writer, self.seq, payload_size)
    }

    fn payload_for(writer: usize, seq: usize, payload_size: usize) -> String {
        let unit = format!("{writer}-{seq};");
        unit.repeat(payload_size / unit.len() + 1)
    }
}

/// Run a sequential write stress test over `resource_count` resources.
pub fn stress_sequential_writes(store: &RecordStore, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        let resource = format!("r{}", i % config.resource_count);
        let doc = StressDoc::new(0, i, config.payload_size);

        match store.write("sequential", &resource, &doc) {
            Ok(()) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run concurrent writers against one collection, each thread owning a
/// disjoint set of resources.
///
/// Afterwards the collection holds `threads * min(operations, resource_count)`
/// documents.
pub fn stress_concurrent_writes(store: Arc<RecordStore>, config: &StressConfig) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let config = config.clone();

            thread::spawn(move || {
                for i in 0..config.operations {
                    let resource = format!("t{t}_r{}", i % config.resource_count);
                    let doc = StressDoc::new(t, i, config.payload_size);

                    match store.write("concurrent", &resource, &doc) {
                        Ok(()) => {
                            successful.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(_) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Run concurrent writers, each on its own collection.
pub fn stress_parallel_collections(
    store: Arc<RecordStore>,
    config: &StressConfig,
) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let config = config.clone();

            thread::spawn(move || {
                let collection = format!("collection_{t}");
                for i in 0..config.operations {
                    let resource = format!("r{}", i % config.resource_count);
                    let doc = StressDoc::new(t, i, config.payload_size);

                    match store.write(&collection, &resource, &doc) {
                        Ok(()) => {
                            successful.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(_) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Hammer one resource with `threads` writers while `threads` readers read
/// it in a loop.
///
/// The returned counts cover reads only: a read succeeds when it decodes to
/// an intact [`StressDoc`]. Any failure means a reader saw a partial file.
pub fn stress_read_during_writes(
    store: Arc<RecordStore>,
    config: &StressConfig,
) -> StressTestResult {
    const COLLECTION: &str = "storm";
    const RESOURCE: &str = "hot";

    store
        .write(COLLECTION, RESOURCE, &StressDoc::new(0, 0, config.payload_size))
        .expect("Failed to seed document");

    let done = Arc::new(AtomicBool::new(false));
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();

    let writers: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let config = config.clone();

            thread::spawn(move || {
                for i in 1..=config.operations {
                    store
                        .write(COLLECTION, RESOURCE, &StressDoc::new(t, i, config.payload_size))
                        .expect("Writer failed");
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..config.threads)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let payload_size = config.payload_size;

            thread::spawn(move || loop {
                // Read once more after `done` so every reader does at least one read.
                let finished = done.load(Ordering::Acquire);
                match store.read::<StressDoc>(COLLECTION, RESOURCE) {
                    Ok(doc) if doc.is_intact(payload_size) => {
                        successful.fetch_add(1, Ordering::Relaxed);
                    }
                    _ => {
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
                if finished {
                    break;
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("Writer thread panicked");
    }
    done.store(true, Ordering::Release);
    for reader in readers {
        reader.join().expect("Reader thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}
