//! Engine scenario tests against a scripted remote.

mod bulk_flow;
mod mock_remote;
mod section_flow;

use std::sync::Arc;

use tokio::sync::mpsc;

use taskdeck_core::{EngineEvent, Section, Task, TaskId};

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::persist::MemoryUiState;

use self::mock_remote::MockRemote;

pub(crate) fn test_engine(
    remote: Arc<MockRemote>,
) -> (Engine, mpsc::Receiver<EngineEvent>, Arc<MemoryUiState>) {
    let (tx, rx) = mpsc::channel(256);
    let persist = Arc::new(MemoryUiState::new());
    let config = EngineConfig::new(1).with_dispatch_batch_delay_ms(0);
    let engine = Engine::new(config, remote, persist.clone(), tx);
    (engine, rx, persist)
}

/// A section with a loaded first page, as if fetched already.
pub(crate) fn loaded_section(id: u64, name: &str, order: f64, tasks: Vec<Task>) -> Section {
    let mut section = Section::new(id, name, order);
    section.cursor.current_page = 1;
    section.cursor.count = tasks.len() as u64;
    section.tasks = tasks;
    section
}

pub(crate) fn persisted_task(section_id: u64, id: u64, name: &str, order: f64) -> Task {
    let mut task = Task::draft(section_id, name, "not-started", order);
    task.id = TaskId::Persisted(id);
    task
}
