//! Persistence adapters for the task module.
//!
//! - [`memory`]: process-local tree, mainly for tests and demos
//! - [`blob`]: the whole tree as one JSON document in a [`BlobStore`]
//! - [`http`]: the remote task service
//!
//! [`BlobStore`]: crate::task::ports::BlobStore

pub mod blob;
mod forest;
pub mod http;
pub mod memory;

use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::config::{BackendConfig, BoardConfig};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Builds the repository selected by `config`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Network`] when the HTTP client cannot be
/// built and [`TaskRepositoryError::Persistence`] when the file store
/// directory cannot be opened.
pub fn connect<C>(config: &BoardConfig, clock: C) -> TaskRepositoryResult<Arc<dyn TaskRepository>>
where
    C: Clock + Send + Sync + 'static,
{
    let repository: Arc<dyn TaskRepository> = match config.backend() {
        BackendConfig::Http { base_url, timeout } => {
            info!(%base_url, "using task service");
            Arc::new(http::HttpTaskRepository::new(base_url.as_str(), *timeout)?)
        }
        BackendConfig::File {
            data_dir,
            storage_key,
        } => {
            info!(%data_dir, %storage_key, "using file store");
            let store =
                blob::FileBlobStore::open(data_dir).map_err(TaskRepositoryError::persistence)?;
            Arc::new(blob::BlobTaskRepository::with_key(
                store,
                storage_key.as_str(),
                clock,
            ))
        }
        BackendConfig::Memory => {
            info!("using in-memory store");
            Arc::new(memory::InMemoryTaskRepository::new(clock))
        }
    };
    Ok(repository)
}
