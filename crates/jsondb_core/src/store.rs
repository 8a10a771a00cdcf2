//! The record store.

use crate::codec;
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::lock::LockTable;
use crate::logger::Logger;
use crate::path::{is_document, is_plain_name, resolve_existing, PathResolver};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Permission bits for collection directories and the root.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
/// Permission bits for document files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// A directory of collections, each a directory of JSON documents.
///
/// # Concurrency
///
/// `write`, `delete` and `drop_collection` take the collection's exclusive
/// lock, so mutations of one collection are totally ordered while
/// different collections proceed in parallel. `read` and `read_all` take no
/// lock. Documents are published with write-to-temp-then-rename, so a
/// reader sees either the previous or the new version of a document, never
/// a partial one.
///
/// The lock table is per store instance. Two stores opened on the same
/// root in one process do not exclude each other.
///
/// # Example
///
/// ```no_run
/// use jsondb_core::RecordStore;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let store = RecordStore::open("./data")?;
/// store.write("users", "john", &User { name: "John".into(), age: 23 })?;
/// let john: User = store.read("users", "john")?;
/// store.delete("users", "john")?;
/// # Ok::<(), jsondb_core::StoreError>(())
/// ```
#[derive(Debug)]
pub struct RecordStore {
    paths: PathResolver,
    locks: LockTable,
    logger: Arc<dyn Logger>,
    sync_writes: bool,
}

impl RecordStore {
    /// Opens the store rooted at `root` with the default configuration,
    /// creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the root cannot be created.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_config(root, Config::default())
    }

    /// Opens the store rooted at `root`.
    ///
    /// Opening an existing root is idempotent: nothing on disk changes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root is missing and `create_if_missing` is false (`NotFound`)
    /// - The root exists but is not a directory (`Validation`)
    /// - The root cannot be created (`Io`)
    pub fn open_with_config(root: impl AsRef<Path>, config: Config) -> StoreResult<Self> {
        let paths = PathResolver::new(root.as_ref());
        let logger = config.resolve_logger();

        match fs::metadata(paths.root()) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(&format!(
                    "using {} (database already exists)",
                    paths.root().display()
                ));
            }
            Ok(_) => {
                return Err(StoreError::validation(format!(
                    "root path is not a directory: {}",
                    paths.root().display()
                )));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if !config.create_if_missing {
                    return Err(StoreError::not_found(paths.root()));
                }
                logger.debug(&format!(
                    "creating the database at {}",
                    paths.root().display()
                ));
                create_dir_all(paths.root())?;
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Self {
            paths,
            locks: LockTable::new(),
            logger,
            sync_writes: config.sync_writes,
        })
    }

    /// Returns the normalized root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Stores `value` as `collection/resource`, replacing any previous
    /// version.
    ///
    /// The collection directory is created on first write. The document is
    /// written to `<resource>.json.tmp` and renamed over `<resource>.json`;
    /// a crash before the rename leaves the previous document untouched.
    ///
    /// # Errors
    ///
    /// - `Validation` if either name is empty or not a single path
    ///   component; nothing is touched on disk
    /// - `Encode` if `value` cannot be represented as JSON
    /// - `Io` if creating the directory, writing or renaming fails
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> StoreResult<()> {
        require_name(collection, "missing collection - no place to save record")?;
        require_name(resource, "missing resource - unable to save record (no name!)")?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let dir = self.paths.collection_dir(collection);
        let final_path = self.paths.resource_path(collection, resource);
        let temp_path = self.paths.temp_path(collection, resource);

        if !dir.is_dir() {
            self.logger.debug(&format!("creating collection {collection}"));
            create_dir_all(&dir)?;
        }

        let bytes =
            codec::encode(value).map_err(|e| StoreError::encode(collection, resource, e))?;
        write_file(&temp_path, &bytes, self.sync_writes)?;
        fs::rename(&temp_path, &final_path)?;
        if self.sync_writes {
            sync_dir(&dir)?;
        }

        self.logger
            .trace(&format!("wrote {collection}/{resource} ({} bytes)", bytes.len()));
        Ok(())
    }

    /// Loads `collection/resource` and decodes it as `T`.
    ///
    /// # Errors
    ///
    /// - `Validation` if either name is empty or not a single path component
    /// - `NotFound` if the document doesn't exist
    /// - `Decode` if the stored JSON doesn't match `T`
    /// - `Io` for any other read failure
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> StoreResult<T> {
        require_name(collection, "missing collection")?;
        require_name(resource, "missing resource")?;

        let stem = self.paths.resource_stem(collection, resource);
        resolve_existing(&stem)?;

        let bytes = fs::read(self.paths.resource_path(collection, resource))
            .map_err(|e| StoreError::from_io_at(e, &stem))?;
        codec::decode(&bytes).map_err(|e| StoreError::decode(collection, resource, e))
    }

    /// Returns every document in `collection` as raw JSON text.
    ///
    /// Order follows the directory listing and is unspecified. Temporary
    /// files of in-flight writes are skipped.
    ///
    /// # Errors
    ///
    /// - `Validation` if `collection` is empty or not a single path component
    /// - `NotFound` if the collection has never been written
    /// - `Io` if listing or reading any single document fails; no partial
    ///   result is returned
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .read_documents(collection)?
            .into_iter()
            .map(|(_, body)| body)
            .collect())
    }

    /// Like [`read_all`](Self::read_all), decoding each document as `T`.
    ///
    /// # Errors
    ///
    /// As `read_all`, plus `Decode` naming the first document that doesn't
    /// match `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.read_documents(collection)?
            .into_iter()
            .map(|(resource, body)| {
                codec::decode(body.as_bytes())
                    .map_err(|e| StoreError::decode(collection, resource, e))
            })
            .collect()
    }

    /// Removes `collection/resource`.
    ///
    /// If the resource name resolves to a directory inside the collection,
    /// that directory is removed recursively.
    ///
    /// # Errors
    ///
    /// - `Validation` if either name is empty or not a single path component; use
    ///   [`drop_collection`](Self::drop_collection) to remove a whole
    ///   collection
    /// - `NotFound` if nothing exists at that key; the store is unchanged
    /// - `Io` if removal fails
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        require_name(collection, "missing collection - nothing to delete")?;
        require_name(
            resource,
            "missing resource - use drop_collection to remove a collection",
        )?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let stem = self.paths.resource_stem(collection, resource);
        let resolved = resolve_existing(&stem)?;
        let removed = if resolved.is_dir() {
            fs::remove_dir_all(&resolved.path)
        } else {
            fs::remove_file(&resolved.path)
        };
        removed.map_err(|e| StoreError::from_io_at(e, &stem))?;

        if self.sync_writes {
            sync_dir(&self.paths.collection_dir(collection))?;
        }

        self.logger.trace(&format!("deleted {collection}/{resource}"));
        Ok(())
    }

    /// Removes `collection` and every document in it.
    ///
    /// # Errors
    ///
    /// - `Validation` if `collection` is empty or not a single path component
    /// - `NotFound` if the collection doesn't exist
    /// - `Io` if removal fails
    pub fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        require_name(collection, "missing collection - nothing to drop")?;

        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let dir = self.paths.collection_dir(collection);
        if !resolve_existing(&dir)?.is_dir() {
            return Err(StoreError::not_found(dir));
        }
        fs::remove_dir_all(&dir).map_err(|e| StoreError::from_io_at(e, &dir))?;
        if self.sync_writes {
            sync_dir(self.paths.root())?;
        }

        self.logger.info(&format!("dropped collection {collection}"));
        Ok(())
    }

    /// Lists `(resource, body)` pairs for every published document.
    fn read_documents(&self, collection: &str) -> StoreResult<Vec<(String, String)>> {
        require_name(collection, "missing collection")?;

        let dir = self.paths.collection_dir(collection);
        if !resolve_existing(&dir)?.is_dir() {
            return Err(StoreError::not_found(dir));
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || !is_document(&path) {
                continue;
            }
            let body = fs::read_to_string(&path).map_err(|e| StoreError::from_io_at(e, &path))?;
            let resource = path
                .file_stem()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned();
            documents.push((resource, body));
        }
        Ok(documents)
    }
}

/// Rejects empty names with `message`, and names that would leave their
/// parent directory (absolute paths, separators, `.`, `..`).
fn require_name(name: &str, message: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::validation(message));
    }
    if !is_plain_name(name) {
        return Err(StoreError::validation(format!(
            "invalid name {name:?}: must be a single path component"
        )));
    }
    Ok(())
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

fn write_file(path: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

/// Makes a rename or unlink inside `path` durable.
///
/// NTFS journals metadata updates, so there is nothing to do off Unix.
#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    fs::File::open(path)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
