//! When steps for board BDD scenarios.

use super::world::{BoardWorld, column, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::domain::{BoardSlot, MoveRequest, PathTarget, TaskDraft};

#[when(r#"I add a task titled "{title}" to the "{status}" column"#)]
fn add_task(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title)?.with_status(column(&status)?);
    run_async(world.board.add_task(draft)).wrap_err("add task")?;
    Ok(())
}

#[when(r#"I open the sub-board of "{title}""#)]
fn open_sub_board(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.visible(&title)?;
    run_async(world.board.navigate_into(&task)).wrap_err("open sub-board")?;
    Ok(())
}

#[when(r#"I delete "{title}""#)]
fn delete_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.visible(&title)?;
    run_async(world.board.delete_task(task.id())).wrap_err("delete task")?;
    Ok(())
}

#[when("I go back to all tasks")]
fn back_to_root(world: &mut BoardWorld) {
    world.board.navigate_to(PathTarget::from_index(-1));
}

#[when(r#"I drag "{title}" from "{source}" {from:usize} to "{target}" {to:usize}"#)]
#[expect(
    clippy::too_many_arguments,
    reason = "Step definition captures both drag endpoints from a single step"
)]
fn drag_task(
    world: &mut BoardWorld,
    title: String,
    source: String,
    from: usize,
    target: String,
    to: usize,
) -> Result<(), eyre::Report> {
    let task = world.visible(&title)?;
    let request = MoveRequest::new(
        task.id().clone(),
        BoardSlot::new(column(&source)?, from),
        BoardSlot::new(column(&target)?, to),
    );
    run_async(world.board.move_task(request)).wrap_err("drag task")?;
    Ok(())
}
