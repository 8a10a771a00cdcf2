//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up stores in temporary
//! directories and common test scenarios.

use jsondb_core::{Config, RecordStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::TempDir;

/// A store rooted in a temporary directory that is removed on drop.
pub struct TestStore {
    /// The store instance.
    pub store: RecordStore,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestStore {
    /// Creates a store in a fresh temporary directory.
    ///
    /// Writes are not fsynced; durability is irrelevant for a directory
    /// that is deleted at the end of the test.
    pub fn new() -> Self {
        Self::with_config(Config::new().sync_writes(false))
    }

    /// Creates a store with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RecordStore::open_with_config(temp_dir.path(), config)
            .expect("Failed to open store");
        Self { store, temp_dir }
    }

    /// Returns the store's root directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Opens a second store on the same root.
    pub fn reopen(&self) -> RecordStore {
        RecordStore::open(self.temp_dir.path()).expect("Failed to reopen store")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = RecordStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a store in a temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// use jsondb_testkit::with_temp_store;
///
/// #[test]
/// fn my_test() {
///     with_temp_store(|store| {
///         store.write("users", "john", &42).unwrap();
///     });
/// }
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&RecordStore) -> R,
{
    let test_store = TestStore::new();
    f(&test_store.store)
}

/// A nested document used throughout the tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Also used as the resource name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Phone number.
    pub contact: String,
    /// Employer.
    pub company: String,
    /// Postal address.
    pub address: Address,
}

/// Postal address nested in [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Country code.
    pub country: String,
    /// Postal code.
    pub pincode: String,
}

/// Builds a deterministic [`Person`] named `name`.
pub fn sample_person(name: &str) -> Person {
    Person {
        name: name.to_string(),
        age: 23 + (name.len() as u32),
        contact: format!("555-{:04}", name.len() * 1111 % 10_000),
        company: format!("{name} & Co"),
        address: Address {
            city: "Toronto".into(),
            state: "ON".into(),
            country: "CA".into(),
            pincode: "1234".into(),
        },
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a store with `count` people in collection `people`, named
    /// `person_0`, `person_1`, ...
    pub fn populated_store(count: usize) -> TestStore {
        let test_store = TestStore::new();
        for i in 0..count {
            let name = format!("person_{i}");
            test_store
                .write("people", &name, &sample_person(&name))
                .expect("Failed to write person");
        }
        test_store
    }

    /// Creates a store with one document in each of `count` collections
    /// named `collection_0`, `collection_1`, ...
    pub fn multi_collection_store(count: usize) -> (TestStore, Vec<String>) {
        let test_store = TestStore::new();
        let mut collections = Vec::with_capacity(count);

        for i in 0..count {
            let name = format!("collection_{i}");
            test_store
                .write(&name, "only", &serde_json::json!({ "collection": i }))
                .expect("Failed to write document");
            collections.push(name);
        }

        (test_store, collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_empty() {
        let test_store = TestStore::new();
        assert!(test_store.path().is_dir());
        assert!(test_store.read_all("anything").is_err());
    }

    #[test]
    fn test_with_temp_store() {
        let loaded = with_temp_store(|store| {
            store.write("users", "john", &sample_person("john")).unwrap();
            store.read::<Person>("users", "john").unwrap()
        });
        assert_eq!(loaded, sample_person("john"));
    }

    #[test]
    fn test_populated_scenario() {
        let test_store = scenarios::populated_store(10);
        assert_eq!(test_store.read_all("people").unwrap().len(), 10);
    }

    #[test]
    fn test_multi_collection_scenario() {
        let (test_store, collections) = scenarios::multi_collection_store(3);
        for collection in &collections {
            assert_eq!(test_store.read_all(collection).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_reopen_sees_data() {
        let test_store = scenarios::populated_store(2);
        let reopened = test_store.reopen();
        assert_eq!(reopened.read_all("people").unwrap().len(), 2);
    }
}
