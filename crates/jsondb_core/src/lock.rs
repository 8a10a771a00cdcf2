//! Per-collection writer locks.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Exclusive lock guarding writes and deletes within one collection.
pub type CollectionLock = Arc<Mutex<()>>;

/// Registry handing out exactly one [`CollectionLock`] per collection name.
///
/// Locks are created on first use and never evicted. The registry's own
/// mutex is held only for the lookup-or-insert, never while a caller holds
/// the collection lock it returned, so writers to different collections
/// don't contend beyond that map access.
///
/// The table grows with the number of distinct collection names the
/// process touches; collection names come from the application, not from
/// untrusted input, so that set stays small.
#[derive(Debug, Default)]
pub struct LockTable {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it on first request.
    pub fn lock_for(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }
        let lock = CollectionLock::default();
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Returns the number of collections that have ever been locked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Returns true if no lock has been handed out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
