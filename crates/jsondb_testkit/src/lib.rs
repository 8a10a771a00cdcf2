//! # jsondb Testkit
//!
//! Test utilities for jsondb.
//!
//! This crate provides:
//! - Temporary-directory store fixtures
//! - Property-based test generators using proptest
//! - Stress testing utilities for concurrent writers and readers
//! - Logging setup for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jsondb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_store() {
//!     with_temp_store(|store| {
//!         store.write("users", "john", &sample_person("john")).unwrap();
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
pub use stress::*;
