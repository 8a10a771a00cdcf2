//! # jsondb Core
//!
//! An embedded document store that keeps one JSON file per record.
//!
//! Records are grouped into collections, each a directory under the store
//! root:
//!
//! ```text
//! <root>/
//! └─ users/
//!    ├─ john.json
//!    └─ paul.json
//! ```
//!
//! This crate provides:
//! - [`RecordStore`]: write, read, read-all and delete of serde values
//! - Atomic publication of documents (write to temp, then rename)
//! - Per-collection writer locks via [`LockTable`]
//! - A pluggable [`Logger`] sink, defaulting to `tracing`
//!
//! There is no indexing and no querying beyond enumerating a collection;
//! filter the result of [`RecordStore::read_all_as`] with iterator adapters.
//!
//! ## Example
//!
//! ```no_run
//! use jsondb_core::{Config, RecordStore};
//!
//! let store = RecordStore::open_with_config("./db", Config::new().sync_writes(false))?;
//! store.write("users", "john", &serde_json::json!({ "name": "John", "age": 23 }))?;
//!
//! for raw in store.read_all("users")? {
//!     println!("{raw}");
//! }
//! # Ok::<(), jsondb_core::StoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
mod config;
mod error;
mod lock;
mod logger;
pub mod path;
mod store;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use lock::{CollectionLock, LockTable};
pub use logger::{LogLevel, Logger, TracingLogger};
pub use path::PathResolver;
pub use store::RecordStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension of published documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Suffix appended to a document path while it is being written.
pub const TEMP_SUFFIX: &str = ".tmp";
