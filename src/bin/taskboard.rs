//! Loads the configured board and dumps its task tree.
//!
//! Usage:
//!
//! ```text
//! TASKBOARD_BACKEND=file TASKBOARD_DATA_DIR=/tmp/board taskboard
//! ```
//!
//! The backend is chosen from the environment (see [`taskboard::config`]).
//! Per-column counts of the root list are logged, and the whole tree is
//! written to standard output as pretty-printed JSON in the task service's
//! wire format.

use std::io::{self, Write};

use mockable::DefaultClock;
use taskboard::config::{BoardConfig, ConfigError};
use taskboard::task::adapters;
use taskboard::task::domain::Status;
use taskboard::task::ports::TaskRepositoryError;
use taskboard::task::services::{BoardError, BoardService};
use taskboard::telemetry;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the dump.
#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to open task store: {0}")]
    Connect(#[source] TaskRepositoryError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] serde_json::Error),
}

fn main() -> Result<(), BoxError> {
    telemetry::init_tracing();
    run().map_err(Into::into)
}

fn run() -> Result<(), CliError> {
    let config = BoardConfig::from_env()?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;

    runtime.block_on(async {
        let repository =
            adapters::connect(&config, DefaultClock).map_err(CliError::Connect)?;
        let board = BoardService::new(repository);
        board.load().await?;

        let view = board.view();
        for status in Status::ALL {
            info!(%status, count = view.column(status).len(), "column");
        }

        let tasks = board.tasks();
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &tasks).map_err(CliError::Output)?;
        writeln!(out).map_err(|err| CliError::Output(serde_json::Error::io(err)))?;
        Ok(())
    })
}
