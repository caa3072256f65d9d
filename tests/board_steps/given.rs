//! Given steps for board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{
    domain::{Status, TaskDraft},
    ports::TaskRepository,
};

#[given("an empty board")]
fn empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.board.load()).wrap_err("load empty board")?;
    Ok(())
}

#[given(r#"a board with task "{parent}" holding subtask "{child}""#)]
fn board_with_subtask(
    world: &mut BoardWorld,
    parent: String,
    child: String,
) -> Result<(), eyre::Report> {
    let parent_task = run_async(world.repository.create_task(&TaskDraft::new(parent)?))
        .wrap_err("store parent task")?;
    run_async(
        world
            .repository
            .create_subtask(parent_task.id(), &TaskDraft::new(child)?),
    )
    .wrap_err("store subtask")?;
    run_async(world.board.load()).wrap_err("load board")?;
    Ok(())
}

#[given(r#"the sub-board of "{parent}" also holds active task "{title}""#)]
fn sub_board_holds_active_task(
    world: &mut BoardWorld,
    parent: String,
    title: String,
) -> Result<(), eyre::Report> {
    let parent_task = world.root(&parent)?;
    let draft = TaskDraft::new(title)?.with_status(Status::Active);
    run_async(world.repository.create_subtask(parent_task.id(), &draft))
        .wrap_err("store active subtask")?;
    run_async(world.board.load()).wrap_err("reload board")?;
    Ok(())
}
