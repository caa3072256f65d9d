//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the board service
//! and the local adapters.

pub mod blob_store;
pub mod repository;

pub use blob_store::{BlobStore, BlobStoreError, BlobStoreResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
