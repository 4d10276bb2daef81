//! Section lifecycle: create (non-optimistic), rename, reorder, collapse,
//! delete.

use std::sync::Arc;

use taskdeck_api::{SectionDeleteMode, TaskPage};
use taskdeck_core::TaskId;

use crate::engine::UpdateOutcome;
use crate::error::EngineError;

use super::mock_remote::MockRemote;
use super::{loaded_section, persisted_task, test_engine};

#[tokio::test]
async fn test_create_section_waits_for_server_id() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());

    let id = engine.create_section("Review").await.unwrap();

    assert_eq!(id, 501);
    assert_eq!(engine.board.sections().len(), 1);
    assert_eq!(engine.board.section(501).unwrap().name, "Review");
}

#[tokio::test]
async fn test_create_section_failure_leaves_board_untouched() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("create_section");
    let (mut engine, _rx, _) = test_engine(remote.clone());

    assert!(engine.create_section("Review").await.is_err());
    assert!(engine.board.sections().is_empty());
}

#[tokio::test]
async fn test_rename_to_same_name_skips_remote() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(10, "Doing", 1.0, vec![]));

    let outcome = engine.rename_section(10, "Doing").await.unwrap();

    assert_eq!(outcome, UpdateOutcome::NoOp);
    assert_eq!(remote.call_count("update_section"), 0);
}

#[tokio::test]
async fn test_rename_failure_restores_name() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("update_section");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(10, "Doing", 1.0, vec![]));

    assert!(engine.rename_section(10, "In review").await.is_err());
    assert_eq!(engine.board.section(10).unwrap().name, "Doing");
}

#[tokio::test]
async fn test_reorder_section_failure_restores_position() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("update_section");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(10, "A", 3.0, vec![]));
    engine.board.push_section(loaded_section(11, "B", 2.0, vec![]));
    engine.board.push_section(loaded_section(12, "C", 1.0, vec![]));

    assert!(engine.reorder_section(12, 0).await.is_err());

    let ids: Vec<_> = engine.board.sections().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
    assert_eq!(engine.board.section(12).unwrap().order, 1.0);
}

#[tokio::test]
async fn test_reorder_section_interpolates() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(10, "A", 4.0, vec![]));
    engine.board.push_section(loaded_section(11, "B", 2.0, vec![]));
    engine.board.push_section(loaded_section(12, "C", 1.0, vec![]));

    engine.reorder_section(12, 1).await.unwrap();

    let ids: Vec<_> = engine.board.sections().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![10, 12, 11]);
    assert_eq!(engine.board.section(12).unwrap().order, 3.0);
}

#[tokio::test]
async fn test_collapse_discards_page_expand_refetches() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(
        10,
        "Doing",
        1.0,
        vec![persisted_task(10, 1, "a", 2.0), persisted_task(10, 2, "b", 1.0)],
    ));
    engine.board.select(TaskId::Persisted(1));
    remote.stub_task_page(
        10,
        1,
        TaskPage {
            tasks: vec![persisted_task(10, 3, "fresh", 1.0)],
            count: 1,
            next: false,
        },
    );

    let collapsed = engine.toggle_collapse(10).await.unwrap();
    assert!(collapsed);
    let section = engine.board.section(10).unwrap();
    assert!(section.tasks.is_empty());
    assert!(!section.cursor.is_loaded());
    assert_eq!(engine.board.selection_len(), 0);

    let collapsed = engine.toggle_collapse(10).await.unwrap();
    assert!(!collapsed);
    // expanding triggered a fresh first-page fetch
    let section = engine.board.section(10).unwrap();
    assert_eq!(section.tasks.len(), 1);
    assert_eq!(section.tasks[0].id, TaskId::Persisted(3));
    assert_eq!(section.cursor.current_page, 1);
}

#[tokio::test]
async fn test_collapse_failure_restores_section() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("toggle_section_collapse");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(
        10,
        "Doing",
        1.0,
        vec![persisted_task(10, 1, "a", 1.0)],
    ));

    assert!(engine.toggle_collapse(10).await.is_err());

    let section = engine.board.section(10).unwrap();
    assert!(!section.collapsed);
    assert_eq!(section.tasks.len(), 1);
    assert!(section.cursor.is_loaded());
}

#[tokio::test]
async fn test_delete_section_failure_restores_with_tasks() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("delete_section");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    engine.board.push_section(loaded_section(
        10,
        "Doing",
        1.0,
        vec![persisted_task(10, 1, "a", 1.0)],
    ));
    engine.board.push_section(loaded_section(11, "Done", 2.0, vec![]));

    let result = engine.delete_section(10, SectionDeleteMode::WithTasks).await;

    assert!(result.is_err());
    let ids: Vec<_> = engine.board.sections().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert_eq!(engine.board.section(10).unwrap().tasks.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_section_is_rejected_up_front() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());

    let result = engine.delete_section(99, SectionDeleteMode::SectionOnly).await;

    assert!(matches!(result, Err(EngineError::SectionNotFound(99))));
    assert_eq!(remote.call_count("delete_section"), 0);
}
