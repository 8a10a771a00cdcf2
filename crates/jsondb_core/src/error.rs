//! Error types for jsondb.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A collection or resource identifier was rejected before any I/O.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },

    /// The requested collection or resource does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A value could not be serialized into a document.
    #[error("failed to encode {collection}/{resource}: {source}")]
    Encode {
        /// Target collection.
        collection: String,
        /// Target resource.
        resource: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// Stored bytes are not a valid document for the requested type.
    #[error("failed to decode {collection}/{resource}: {source}")]
    Decode {
        /// Collection the document was read from.
        collection: String,
        /// Resource the document was read from.
        resource: String,
        /// Underlying deserializer error.
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an encode error.
    pub fn encode(
        collection: impl Into<String>,
        resource: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Encode {
            collection: collection.into(),
            resource: resource.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(
        collection: impl Into<String>,
        resource: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            collection: collection.into(),
            resource: resource.into(),
            source,
        }
    }

    /// Maps an I/O error on `path` to `NotFound` when the OS reports a
    /// missing entry, and to `Io` otherwise.
    pub(crate) fn from_io_at(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io(err)
        }
    }

    /// Returns true for `Validation` errors.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for `NotFound` errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_maps_to_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = StoreError::from_io_at(err, "/tmp/x.json");
        assert!(mapped.is_not_found());
        assert_eq!(mapped.to_string(), "not found: /tmp/x.json");
    }

    #[test]
    fn other_io_kinds_stay_io() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let mapped = StoreError::from_io_at(err, "/tmp/x.json");
        assert!(matches!(mapped, StoreError::Io(_)));
        assert!(!mapped.is_not_found());
    }

    #[test]
    fn validation_message() {
        let err = StoreError::validation("missing collection");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "validation error: missing collection");
    }
}
