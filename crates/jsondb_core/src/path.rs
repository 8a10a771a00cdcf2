//! On-disk layout.
//!
//! ```text
//! <root>/
//! └─ <collection>/
//!    ├─ <resource>.json       # pretty-printed document
//!    └─ <resource>.json.tmp   # present only while a write is in flight
//! ```
//!
//! Every collection is an immediate subdirectory of the root and every
//! resource is one file inside it. Nothing here touches the filesystem
//! except [`resolve_existing`], which only stats.

use crate::error::{StoreError, StoreResult};
use crate::{DOCUMENT_EXTENSION, TEMP_SUFFIX};
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Maps `(collection, resource)` keys to paths under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver for `root`, normalizing it first.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: normalize(root),
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `root/collection`.
    #[must_use]
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// Returns `root/collection/resource`, without the document extension.
    ///
    /// This is the probe path handed to [`resolve_existing`].
    #[must_use]
    pub fn resource_stem(&self, collection: &str, resource: &str) -> PathBuf {
        self.collection_dir(collection).join(resource)
    }

    /// Returns `root/collection/resource.json`.
    #[must_use]
    pub fn resource_path(&self, collection: &str, resource: &str) -> PathBuf {
        with_document_extension(&self.resource_stem(collection, resource))
    }

    /// Returns the temporary sibling used while writing `resource`.
    #[must_use]
    pub fn temp_path(&self, collection: &str, resource: &str) -> PathBuf {
        append_suffix(&self.resource_path(collection, resource), TEMP_SUFFIX)
    }
}

/// A path found on disk by [`resolve_existing`].
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The path that exists.
    pub path: PathBuf,
    /// Its metadata.
    pub metadata: Metadata,
}

impl Resolved {
    /// Returns true if the resolved entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Returns true if the resolved entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }
}

/// Stats `path`, falling back to `path.json` if `path` itself is absent.
///
/// The first probe finds collection directories (and any directory nested
/// under a collection); the second finds documents.
///
/// # Errors
///
/// Returns `NotFound` (naming the unsuffixed path) when neither exists, and
/// `Io` for any other stat failure.
pub fn resolve_existing(path: &Path) -> StoreResult<Resolved> {
    match fs::metadata(path) {
        Ok(metadata) => {
            return Ok(Resolved {
                path: path.to_path_buf(),
                metadata,
            })
        }
        Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err.into()),
        Err(_) => {}
    }

    let suffixed = with_document_extension(path);
    match fs::metadata(&suffixed) {
        Ok(metadata) => Ok(Resolved {
            path: suffixed,
            metadata,
        }),
        Err(err) => Err(StoreError::from_io_at(err, path)),
    }
}

/// Returns true if `path` names a published document, as opposed to a
/// temporary file or anything foreign.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION)
}

/// Returns true if `name` is exactly one normal path component, so joining
/// it onto a directory yields an immediate child of that directory.
///
/// Both separators are rejected on every platform, keeping a store
/// directory portable.
#[must_use]
pub fn is_plain_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Appends `.json` without replacing an existing extension, so a resource
/// named `v1.2` maps to `v1.2.json`.
fn with_document_extension(path: &Path) -> PathBuf {
    let mut suffix = String::with_capacity(DOCUMENT_EXTENSION.len() + 1);
    suffix.push('.');
    suffix.push_str(DOCUMENT_EXTENSION);
    append_suffix(path, &suffix)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Lexical cleanup: drops `.` components and redundant separators.
/// `..` is kept, since resolving it would require touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
