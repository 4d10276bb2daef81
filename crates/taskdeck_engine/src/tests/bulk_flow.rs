//! Bulk intents over a mixed working set of drafts and persisted tasks.

use std::sync::Arc;

use taskdeck_api::TaskPatch;
use taskdeck_core::{EngineEvent, Priority, Task, TaskId};

use super::mock_remote::MockRemote;
use super::{loaded_section, persisted_task, test_engine};

/// Three persisted rows and two unsaved drafts in one section, all selected.
fn seed_mixed(engine: &mut crate::engine::Engine) -> Vec<TaskId> {
    let d1 = Task::draft(7, "draft one", "not-started", 5.0);
    let d2 = Task::draft(7, "draft two", "not-started", 4.0);
    let ids = vec![
        d1.id.clone(),
        d2.id.clone(),
        TaskId::Persisted(1),
        TaskId::Persisted(2),
        TaskId::Persisted(3),
    ];
    engine.board.push_section(loaded_section(
        7,
        "Doing",
        1.0,
        vec![
            d1,
            d2,
            persisted_task(7, 1, "a", 3.0),
            persisted_task(7, 2, "b", 2.0),
            persisted_task(7, 3, "c", 1.0),
        ],
    ));
    for id in &ids {
        engine.board.select(id.clone());
    }
    ids
}

#[tokio::test]
async fn test_bulk_delete_submits_persisted_removes_all() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, mut rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);

    let outcome = engine.bulk_delete(&ids).await.unwrap();

    // only the three server-side ids crossed the boundary
    let mut submitted = remote.last_bulk_ids().unwrap();
    submitted.sort_unstable();
    assert_eq!(submitted, vec![1, 2, 3]);
    assert_eq!(outcome.submitted.len(), 3);
    assert_eq!(outcome.skipped.len(), 2);
    // all five rows are gone locally, and the selection with them
    assert!(engine.board.section(7).unwrap().tasks.is_empty());
    assert_eq!(engine.board.selection_len(), 0);
    assert!(matches!(rx.try_recv().unwrap(), EngineEvent::BulkSkipped { skipped } if skipped.len() == 2));
}

#[tokio::test]
async fn test_bulk_delete_failure_restores_only_persisted_rows() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("bulk_delete");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);

    let result = engine.bulk_delete(&ids).await;

    assert!(result.is_err());
    let tasks = &engine.board.section(7).unwrap().tasks;
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| !t.is_optimistic()));
    // persisted rows came back in their original relative order
    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_bulk_update_edits_drafts_locally_only() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);

    let outcome = engine
        .bulk_update(&ids, TaskPatch::default().priority(Priority::High))
        .await
        .unwrap();

    assert_eq!(outcome.submitted.len(), 3);
    assert_eq!(outcome.skipped.len(), 2);
    // every row, draft or not, shows the edit
    assert!(engine
        .board
        .section(7)
        .unwrap()
        .tasks
        .iter()
        .all(|t| t.priority == Priority::High));
    let mut submitted = remote.last_bulk_ids().unwrap();
    submitted.sort_unstable();
    assert_eq!(submitted, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_bulk_update_failure_restores_persisted_rows() {
    let remote = Arc::new(MockRemote::new());
    remote.fail("bulk_update");
    let (mut engine, _rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);

    let result = engine
        .bulk_update(&ids, TaskPatch::default().priority(Priority::High))
        .await;

    assert!(result.is_err());
    let tasks = &engine.board.section(7).unwrap().tasks;
    // persisted rows rolled back; drafts keep the local edit
    assert!(tasks
        .iter()
        .filter(|t| !t.is_optimistic())
        .all(|t| t.priority == Priority::Medium));
    assert!(tasks
        .iter()
        .filter(|t| t.is_optimistic())
        .all(|t| t.priority == Priority::High));
}

#[tokio::test]
async fn test_bulk_change_section_moves_whole_set() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);
    engine.board.push_section(loaded_section(8, "Done", 2.0, vec![]));

    let outcome = engine.bulk_change_section(&ids, 8).await.unwrap();

    assert_eq!(outcome.submitted.len(), 3);
    assert!(engine.board.section(7).unwrap().tasks.is_empty());
    let dest = engine.board.section(8).unwrap();
    assert_eq!(dest.tasks.len(), 5);
    assert!(dest.tasks.iter().all(|t| t.section_id == 8));
    let mut submitted = remote.last_bulk_ids().unwrap();
    submitted.sort_unstable();
    assert_eq!(submitted, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_empty_bulk_patch_is_a_noop() {
    let remote = Arc::new(MockRemote::new());
    let (mut engine, _rx, _) = test_engine(remote.clone());
    let ids = seed_mixed(&mut engine);

    let outcome = engine.bulk_update(&ids, TaskPatch::default()).await.unwrap();

    assert!(outcome.submitted.is_empty());
    assert_eq!(remote.call_count("bulk_update"), 0);
}
