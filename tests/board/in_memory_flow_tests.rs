//! End-to-end board flows over the in-memory repository.

use std::sync::Arc;

use rstest::rstest;
use taskboard::task::domain::{BoardSlot, MoveRequest, PathTarget, Status};
use taskboard::task::services::MoveOutcome;

use super::helpers::{MemoryBoard, board, draft, titles};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drilling_three_levels_and_back(board: MemoryBoard) {
    let plan = board.add_task(draft("Plan")).await.expect("root created");
    board.navigate_into(&plan).await.expect("into plan");
    let outline = board.add_task(draft("Outline")).await.expect("child created");
    board.navigate_into(&outline).await.expect("into outline");
    board.add_task(draft("Intro")).await.expect("grandchild created");

    assert_eq!(titles(&board.current_tasks()), vec!["Intro"]);
    let crumbs: Vec<String> = board
        .view()
        .breadcrumbs
        .iter()
        .map(|crumb| crumb.title().to_string())
        .collect();
    assert_eq!(crumbs, vec!["Plan", "Outline"]);

    board.navigate_to(PathTarget::Breadcrumb(0));
    assert_eq!(titles(&board.current_tasks()), vec!["Outline"]);

    board.navigate_to(PathTarget::Root);
    assert_eq!(titles(&board.current_tasks()), vec!["Plan"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_fresh_board_sees_what_another_board_stored(board: MemoryBoard) {
    let plan = board.add_task(draft("Plan")).await.expect("root created");
    board.navigate_into(&plan).await.expect("into plan");
    board.add_task(draft("Outline")).await.expect("child created");

    board.load().await.expect("reload");

    let tasks = board.tasks();
    let stored_plan = tasks.first().expect("plan stored");
    assert_eq!(titles(stored_plan.subtasks()), vec!["Outline"]);
    assert_eq!(titles(&board.current_tasks()), vec!["Outline"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moves_are_persisted(board: MemoryBoard) {
    let plan = board.add_task(draft("Plan")).await.expect("root created");
    board
        .add_task(draft("Ship").with_status(Status::Active))
        .await
        .expect("root created");

    let outcome = board
        .move_task(MoveRequest::new(
            plan.id().clone(),
            BoardSlot::new(Status::Backlog, 0),
            BoardSlot::new(Status::Finished, 0),
        ))
        .await
        .expect("move persisted");
    assert!(matches!(outcome, MoveOutcome::Moved(_)));

    board.load().await.expect("reload");
    let finished = board.tasks_by_status(Status::Finished);
    assert_eq!(titles(&finished), vec!["Plan"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn untouched_roots_stay_shared_across_nested_edits(board: MemoryBoard) {
    let plan = board.add_task(draft("Plan")).await.expect("root created");
    board.add_task(draft("Ship")).await.expect("root created");
    let ship_before = Arc::clone(board.tasks().get(1).expect("ship listed"));

    board.navigate_into(&plan).await.expect("into plan");
    board.add_task(draft("Outline")).await.expect("child created");

    let tasks = board.tasks();
    let ship_after = tasks.get(1).expect("ship listed");
    assert!(Arc::ptr_eq(ship_after, &ship_before));
}
