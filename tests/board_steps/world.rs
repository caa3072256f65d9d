//! Shared world state for board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Status, Task},
    services::BoardService,
};

/// Repository type used by the BDD world.
pub type TestRepository = InMemoryTaskRepository<DefaultClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub repository: Arc<TestRepository>,
    pub board: BoardService<TestRepository>,
}

impl BoardWorld {
    /// Creates a world around an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new(DefaultClock));
        let board = BoardService::new(Arc::clone(&repository));
        Self { repository, board }
    }

    /// Finds a task on the viewed board by title.
    pub fn visible(&self, title: &str) -> Result<Arc<Task>, eyre::Report> {
        self.board
            .current_tasks()
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the viewed board"))
    }

    /// Finds a root task by title.
    pub fn root(&self, title: &str) -> Result<Arc<Task>, eyre::Report> {
        self.board
            .tasks()
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no root task titled {title:?}"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a column name used in feature files.
pub fn column(name: &str) -> Result<Status, eyre::Report> {
    Status::try_from(name).map_err(|err| eyre::eyre!("{err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
