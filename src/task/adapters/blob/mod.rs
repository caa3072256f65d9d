//! Local-storage persistence: the whole task tree kept as one JSON blob.
//!
//! [`BlobTaskRepository`] owns the tree semantics; the [`BlobStore`]
//! implementations here only move bytes.
//!
//! [`BlobStore`]: crate::task::ports::BlobStore

mod file_store;
mod memory_store;
mod repository;

pub use file_store::FileBlobStore;
pub use memory_store::InMemoryBlobStore;
pub use repository::{BlobTaskRepository, DEFAULT_STORAGE_KEY};
