//! Process-local blob store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{BlobStore, BlobStoreError, BlobStoreResult};

/// Blob store backed by a shared map.
///
/// Clones share the same contents, which lets tests inspect what a
/// repository wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn load(&self, key: &str) -> BlobStoreResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        Ok(blobs.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: Vec<u8>) -> BlobStoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        blobs.insert(key.to_owned(), blob);
        Ok(())
    }
}
