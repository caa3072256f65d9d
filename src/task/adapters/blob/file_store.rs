//! Blob store writing one file per key inside a capability-scoped directory.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::debug;

use crate::task::ports::{BlobStore, BlobStoreError, BlobStoreResult};

const BLOB_EXTENSION: &str = "json";

/// Filesystem blob store.
///
/// Each key maps to `<key>.json` in the store directory. Writes go to a
/// temporary sibling first and are renamed into place, so readers observe
/// either the previous blob or the new one.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: Arc<Dir>,
}

impl FileBlobStore {
    /// Opens the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(path: impl AsRef<Utf8Path>) -> BlobStoreResult<Self> {
        let root = path.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn run_blocking<F, T>(&self, f: F) -> BlobStoreResult<T>
    where
        F: FnOnce(&Dir) -> BlobStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(BlobStoreError::storage)?
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn load(&self, key: &str) -> BlobStoreResult<Option<Vec<u8>>> {
        let file_name = blob_file_name(key)?;
        self.run_blocking(move |dir| match dir.read(&file_name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BlobStoreError::storage(err)),
        })
        .await
    }

    async fn save(&self, key: &str, blob: Vec<u8>) -> BlobStoreResult<()> {
        let file_name = blob_file_name(key)?;
        let temp_name = format!("{file_name}.tmp");
        let size = blob.len();
        self.run_blocking(move |dir| {
            dir.write(&temp_name, &blob).map_err(BlobStoreError::storage)?;
            dir.rename(&temp_name, dir, &file_name)
                .map_err(BlobStoreError::storage)
        })
        .await?;
        debug!(key, size, "saved blob");
        Ok(())
    }
}

/// Maps a key to its file name, rejecting anything but a plain name.
fn blob_file_name(key: &str) -> BlobStoreResult<String> {
    let is_safe = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if is_safe {
        Ok(format!("{key}.{BLOB_EXTENSION}"))
    } else {
        Err(BlobStoreError::InvalidKey(key.to_owned()))
    }
}
