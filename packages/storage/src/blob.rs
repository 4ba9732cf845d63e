// ABOUTME: Key-value blob stores holding whole JSON documents
// ABOUTME: File-per-key store for the data directory and an in-memory store for tests

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Whole-document storage under fixed string keys.
///
/// There is no partial update: a document is read, replaced or removed as a
/// unit. Callers assume a single writer.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Stores each key as `<base>/<key>.json`
///
/// ```text
/// <base>/
/// ├── taxify_meta.json
/// ├── taxify_profile.json
/// ├── taxify_incomes.json
/// └── taxify_alerts.json
/// ```
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    base: PathBuf,
}

impl FileBlobStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        if !self.base.exists() {
            debug!("Creating data directory: {:?}", self.base);
            fs::create_dir_all(&self.base).await?;
        }

        // Write next to the target and rename, so readers never see a partial document
        let path = self.path_for(key);
        let tmp_path = self.base.join(format!("{key}.json.tmp"));
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store, handy in tests and for dry runs
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.blobs.write().await.remove(key);
        Ok(())
    }
}
