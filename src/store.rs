//! Flat-file persistence for the store's collections.

use std::{
    collections::HashMap,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, RwLock};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode collection {collection}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write collection {collection}")]
    Write {
        collection: &'static str,
        #[source]
        source: io::Error,
    },
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn read_blob(&self, name: &str) -> io::Result<Option<Vec<u8>>>;

    async fn write_blob(&self, name: &str, bytes: Vec<u8>) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn read_blob(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write_blob(&self, name: &str, bytes: Vec<u8>) -> io::Result<()> {
        let dir = self.root.clone();
        let path = self.root.join(name);
        tokio::task::spawn_blocking(move || write_replace(&dir, &path, &bytes))
            .await
            .map_err(io::Error::other)?
    }
}

/// Writes `bytes` to a temp file in `dir` and renames it over `path`, so
/// readers see either the old content or the new one.
pub(crate) fn write_replace(dir: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read_blob(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.read().await.get(name).cloned())
    }

    async fn write_blob(&self, name: &str, bytes: Vec<u8>) -> io::Result<()> {
        self.blobs.write().await.insert(name.to_string(), bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
    Config,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Config => "config",
        }
    }

    pub fn blob_name(self) -> &'static str {
        match self {
            Collection::Products => "products.json",
            Collection::Orders => "orders.json",
            Collection::Config => "config.json",
        }
    }

    fn slot(self) -> usize {
        match self {
            Collection::Products => 0,
            Collection::Orders => 1,
            Collection::Config => 2,
        }
    }
}

pub struct RecordStore {
    blobs: Arc<dyn BlobStore>,
    locks: [Mutex<()>; 3],
}

impl RecordStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    pub async fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.locks[collection.slot()].lock().await
    }

    /// Loads a collection, falling back to `T::default()` when the blob is
    /// absent, unreadable or not valid JSON for `T`.
    pub async fn load<T>(&self, collection: Collection) -> T
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match self.blobs.read_blob(collection.blob_name()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return T::default(),
            Err(err) => {
                tracing::warn!(
                    collection = collection.name(),
                    error = %err,
                    "collection unreadable, using empty default"
                );
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    collection = collection.name(),
                    error = %err,
                    "collection is not valid JSON, using empty default"
                );
                T::default()
            }
        }
    }

    pub async fn save<T>(&self, collection: Collection, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            collection: collection.name(),
            source,
        })?;
        self.blobs
            .write_blob(collection.blob_name(), bytes)
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.name(),
                source,
            })?;
        tracing::debug!(collection = collection.name(), "collection saved");
        Ok(())
    }
}
