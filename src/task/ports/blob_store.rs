//! Key-value blob store port used by local task persistence.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Minimal key-value store holding opaque byte blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `None` when nothing has been stored under the key yet.
    async fn load(&self, key: &str) -> BlobStoreResult<Option<Vec<u8>>>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn save(&self, key: &str, blob: Vec<u8>) -> BlobStoreResult<()>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The key cannot be used as a storage name.
    #[error("invalid blob key '{0}'")]
    InvalidKey(String),

    /// Underlying storage failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
