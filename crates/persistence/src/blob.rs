// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bucket-keyed file storage for site and ticket attachments.
//!
//! A bucket is a slash-separated prefix such as `sites/site_aerial`. Paths
//! inside a bucket are relative and may not climb out of it.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Blob storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// A file store addressed by bucket and relative path.
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `bucket/path` and returns `path`.
    ///
    /// Existing files are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the path is taken, `InvalidPath` for an
    /// unsafe path, or an I/O error.
    fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Reads the file at `bucket/path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such file.
    fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Removes every listed path from `bucket`. Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first failure other than a missing file.
    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;
}

/// Rejects empty keys and any component that is not a plain name.
fn relative_key(bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
    let joined: PathBuf = Path::new(bucket).join(path);

    let plain: bool = !bucket.is_empty()
        && !path.is_empty()
        && joined
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !plain {
        return Err(StorageError::InvalidPath(format!("{bucket}/{path}")));
    }

    Ok(joined)
}

/// Stores blobs as files under a base directory, one subdirectory per bucket.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
        Ok(self.base_path.join(relative_key(bucket, path)?))
    }
}

impl BlobStore for LocalBlobStore {
    fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let full_path: PathBuf = self.full_path(bucket, path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file: fs::File = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(format!("{bucket}/{path}")));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(bytes)?;

        info!(bucket, path, size = bytes.len(), "Stored file");
        Ok(path.to_string())
    }

    fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path: PathBuf = self.full_path(bucket, path)?;
        debug!(bucket, path, "Reading file");

        match fs::read(&full_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("{bucket}/{path}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            let full_path: PathBuf = self.full_path(bucket, path)?;
            match fs::remove_file(&full_path) {
                Ok(()) => info!(bucket, path = %path, "Removed file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(bucket, path = %path, "File to remove was already gone");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Keeps blobs in memory. Used by tests.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `bucket/path` is stored.
    #[must_use]
    pub fn contains(&self, bucket: &str, path: &str) -> bool {
        let Ok(key) = relative_key(bucket, path) else {
            return false;
        };
        self.files
            .lock()
            .map(|files| files.contains_key(&key))
            .unwrap_or(false)
    }

    /// Number of stored files across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>>, StorageError> {
        self.files
            .lock()
            .map_err(|e| StorageError::Other(format!("Blob store lock poisoned: {e}")))
    }
}

impl BlobStore for InMemoryBlobStore {
    fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let key: PathBuf = relative_key(bucket, path)?;
        let mut files = self.lock()?;
        if files.contains_key(&key) {
            return Err(StorageError::AlreadyExists(format!("{bucket}/{path}")));
        }
        files.insert(key, bytes.to_vec());
        Ok(path.to_string())
    }

    fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError> {
        let key: PathBuf = relative_key(bucket, path)?;
        self.lock()?
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{bucket}/{path}")))
    }

    fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let keys: Vec<PathBuf> = paths
            .iter()
            .map(|path| relative_key(bucket, path))
            .collect::<Result<_, _>>()?;
        let mut files = self.lock()?;
        for key in &keys {
            files.remove(key);
        }
        Ok(())
    }
}
