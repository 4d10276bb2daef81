//! The mutation orchestrator.
//!
//! Every intent runs the same pipeline: validate, snapshot the touched
//! entities, apply the change to the board synchronously, call the remote
//! boundary, then merge the confirmed result or replay the snapshot
//! verbatim. Intents take `&mut self`, so the board is never observed
//! mid-mutation; the only suspension point is the remote call itself.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::warn;

use taskdeck_api::{
    InsertionNeighbors, ProjectRemote, SectionDeleteMode, SectionPatch, TaskPatch, TaskPayload,
};
use taskdeck_core::db::PanelState;
use taskdeck_core::{
    interpolate, neighbor_orders, EngineEvent, FilterState, PageCursor, Task, TaskId,
};

use crate::config::EngineConfig;
use crate::dispatch::{self, DispatchOutcome};
use crate::error::{EngineError, Result};
use crate::paging::{merge_page, MergeMode};
use crate::persist::UiStatePort;
use crate::store::{Board, RollbackTable};

/// What `update_task` (and `rename_section`) did with the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The change was applied and confirmed remotely.
    Applied,
    /// Every submitted field already held the requested value; no local
    /// write, no remote call.
    NoOp,
    /// The target is an unconfirmed draft; the edit stayed local and rides
    /// along when the pending create is confirmed.
    LocalOnly,
}

/// Result of a bulk intent: the server-side ids actually submitted and the
/// placeholder ids excluded from the remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub submitted: Vec<u64>,
    pub skipped: Vec<TaskId>,
}

pub struct Engine {
    pub board: Board,
    pub config: EngineConfig,
    remote: Arc<dyn ProjectRemote>,
    persist: Arc<dyn UiStatePort>,
    events: mpsc::Sender<EngineEvent>,
    /// Baseline the next filter dispatch compares against.
    filters: FilterState,
    /// Set while a filter dispatch is running its batches; a dispatch that
    /// arrives in the window is dropped, never queued.
    dispatch_in_flight: bool,
    /// Task shown in the detail panel, if any. Its snapshot is rewritten on
    /// every mutation that touches it.
    panel_task: Option<TaskId>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        remote: Arc<dyn ProjectRemote>,
        persist: Arc<dyn UiStatePort>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            board: Board::new(config.project_id),
            config,
            remote,
            persist,
            events,
            filters: FilterState::default(),
            dispatch_in_flight: false,
            panel_task: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatch_in_flight
    }

    async fn emit(&self, event: EngineEvent) {
        // nobody listening is fine
        let _ = self.events.send(event).await;
    }

    // --- task mutations ---

    /// Insert an optimistic draft at the head of a section and create it
    /// remotely. The placeholder row is visible before the call is issued;
    /// on confirmation it is swapped in place for the server entity, on
    /// failure it is removed.
    pub async fn create_task(&mut self, section_id: u64, name: &str) -> Result<TaskId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("task name is empty".into()));
        }
        let (status, head_order) = match self.board.section(section_id) {
            Some(section) => (
                section.initial_status(),
                section.tasks.first().map(|t| t.order),
            ),
            None => return Err(EngineError::SectionNotFound(section_id)),
        };

        let task = Task::draft(section_id, name, status, interpolate(None, head_order));
        let temp_id = task.id.clone();
        let payload = TaskPayload::from_task(&task);
        self.board.insert_task(section_id, 0, task);
        self.emit(EngineEvent::task_created(section_id, temp_id.clone()))
            .await;

        match self.remote.create_task(section_id, &payload).await {
            Ok(server) => Ok(self.confirm_create(&temp_id, server, &payload).await),
            Err(err) => {
                self.board.take_task(&temp_id);
                self.board.deselect(&temp_id);
                if self.panel_task.as_ref() == Some(&temp_id) {
                    self.close_panel();
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("create_task", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Swap the placeholder for the confirmed entity, in place. Fields the
    /// user edited while the create was in flight win over the server copy,
    /// since those edits were never submitted.
    async fn confirm_create(&mut self, temp_id: &TaskId, mut server: Task, sent: &TaskPayload) -> TaskId {
        let real_id = server.id.clone();
        let home = server.section_id;
        if let Some(local) = self.board.task_mut(temp_id) {
            if local.name != sent.name {
                server.name = local.name.clone();
            }
            if local.description != sent.description {
                server.description = local.description.clone();
            }
            if local.priority != sent.priority {
                server.priority = local.priority;
            }
            if local.due_date != sent.due_date {
                server.due_date = local.due_date;
            }
            *local = server;
        } else if let Some(section) = self.board.section_mut(home) {
            // placeholder vanished (section refetched or collapsed); keep the
            // confirmed entity visible at the tail
            section.tasks.push(server);
        }
        self.board.migrate_selection(temp_id, &real_id);
        if self.panel_task.as_ref() == Some(temp_id) {
            self.panel_task = Some(real_id.clone());
            self.persist_panel();
        }
        self.emit(EngineEvent::task_confirmed(temp_id.clone(), real_id.clone()))
            .await;
        real_id
    }

    /// Patch a task. Fields already holding the requested value are a no-op
    /// with zero remote calls; edits to an unconfirmed draft stay local.
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<UpdateOutcome> {
        let (completed, fallback) = match self.board.section_of(id) {
            Some(section) => (section.completed_value(), section.initial_status()),
            None => return Err(EngineError::TaskNotFound(id.to_string())),
        };
        if patch.is_empty() || self.board.task(id).is_some_and(|t| patch.matches(t)) {
            return Ok(UpdateOutcome::NoOp);
        }

        let real = match id.persisted() {
            Some(real) => real,
            None => {
                if let Some(task) = self.board.task_mut(id) {
                    patch.apply(task, &completed, &fallback);
                }
                self.sync_panel(id);
                return Ok(UpdateOutcome::LocalOnly);
            }
        };

        let mut rollback = RollbackTable::new();
        rollback.save_task(&self.board, id);
        if let Some(task) = self.board.task_mut(id) {
            patch.apply(task, &completed, &fallback);
        }
        self.sync_panel(id);

        match self.remote.update_task(real, &patch).await {
            Ok(server) => {
                // the row may have vanished while the call was in flight;
                // nothing to merge into then
                if let Some(local) = self.board.task_mut(id) {
                    patch.merge_confirmed(local, &server);
                    self.sync_panel(id);
                }
                Ok(UpdateOutcome::Applied)
            }
            Err(err) => {
                if self.board.task(id).is_some() {
                    rollback.restore(&mut self.board);
                    self.sync_panel(id);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("update_task", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Remove a task optimistically. Drafts never reached the server, so
    /// removing one is purely local; a remote 404 counts as success.
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        let mut rollback = RollbackTable::new();
        if !rollback.save_task(&self.board, id) {
            return Err(EngineError::TaskNotFound(id.to_string()));
        }
        self.board.take_task(id);
        self.board.deselect(id);
        if self.panel_task.as_ref() == Some(id) {
            self.close_panel();
        }

        let Some(real) = id.persisted() else {
            return Ok(());
        };
        match self.remote.delete_task(real).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => {
                rollback.restore(&mut self.board);
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("delete_task", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Move a task to the head of another section.
    pub async fn change_task_section(&mut self, id: &TaskId, dest_id: u64) -> Result<()> {
        let source_id = match self.board.section_of(id) {
            Some(section) => section.id,
            None => return Err(EngineError::TaskNotFound(id.to_string())),
        };
        if source_id == dest_id {
            return Ok(());
        }
        let (head_order, after) = match self.board.section(dest_id) {
            Some(dest) => (
                dest.tasks.first().map(|t| t.order),
                dest.tasks.first().and_then(|t| t.id.persisted()),
            ),
            None => return Err(EngineError::SectionNotFound(dest_id)),
        };

        let mut rollback = RollbackTable::new();
        rollback.save_task(&self.board, id);
        if let Some(mut task) = self.board.take_task(id) {
            task.section_id = dest_id;
            task.order = interpolate(None, head_order);
            self.board.insert_task(dest_id, 0, task);
        }
        self.sync_panel(id);

        let Some(real) = id.persisted() else {
            return Ok(());
        };
        let neighbors = InsertionNeighbors { before: None, after };
        match self.remote.change_task_section(real, dest_id, neighbors).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.board.task(id).is_some() {
                    rollback.restore(&mut self.board);
                    self.sync_panel(id);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("change_task_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Drag a task to `index` in `dest_id`, deriving its new order from the
    /// two neighbors at the drop point. A same-section drag reorders; a
    /// cross-section drag moves with the insertion neighbors attached.
    pub async fn reorder_task(&mut self, id: &TaskId, dest_id: u64, index: usize) -> Result<()> {
        let (order, neighbors, at) = {
            let dest = match self.board.section(dest_id) {
                Some(dest) => dest,
                None => return Err(EngineError::SectionNotFound(dest_id)),
            };
            let (prev, next) = neighbor_orders(&dest.tasks, index, Some(id));
            let order = interpolate(prev.map(|t| t.order), next.map(|t| t.order));
            let neighbors = InsertionNeighbors {
                before: prev.and_then(|t| t.id.persisted()),
                after: next.and_then(|t| t.id.persisted()),
            };
            let visible = dest.tasks.iter().filter(|t| &t.id != id).count();
            (order, neighbors, index.min(visible))
        };

        let mut rollback = RollbackTable::new();
        if !rollback.save_task(&self.board, id) {
            return Err(EngineError::TaskNotFound(id.to_string()));
        }
        let same_section = match self.board.take_task(id) {
            Some(mut task) => {
                let same = task.section_id == dest_id;
                task.section_id = dest_id;
                task.order = order;
                self.board.insert_task(dest_id, at, task);
                same
            }
            None => return Err(EngineError::TaskNotFound(id.to_string())),
        };
        self.sync_panel(id);

        let Some(real) = id.persisted() else {
            return Ok(());
        };
        let call = if same_section {
            self.remote
                .reorder_task(neighbors.before, real, neighbors.after)
                .await
        } else {
            self.remote.change_task_section(real, dest_id, neighbors).await
        };
        match call {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.board.task(id).is_some() {
                    rollback.restore(&mut self.board);
                    self.sync_panel(id);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("reorder_task", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    // --- bulk task mutations ---

    /// Split a working set into server-side ids to submit and placeholder
    /// ids that only exist locally. Ids not on the board are dropped.
    fn partition_bulk(&self, ids: &[TaskId]) -> (Vec<u64>, Vec<TaskId>) {
        let mut submitted = Vec::new();
        let mut skipped = Vec::new();
        for id in ids {
            if self.board.find_task(id).is_none() {
                continue;
            }
            match id.persisted() {
                Some(real) => submitted.push(real),
                None => skipped.push(id.clone()),
            }
        }
        (submitted, skipped)
    }

    async fn note_skipped(&self, skipped: &[TaskId]) {
        if skipped.is_empty() {
            return;
        }
        self.emit(EngineEvent::bulk_skipped(skipped.to_vec())).await;
        self.emit(EngineEvent::notice(format!(
            "{} unsaved task(s) were skipped",
            skipped.len()
        )))
        .await;
    }

    /// Delete the whole working set locally; only persisted ids go to the
    /// server. On failure exactly the persisted rows are restored.
    pub async fn bulk_delete(&mut self, ids: &[TaskId]) -> Result<BulkOutcome> {
        let (submitted, skipped) = self.partition_bulk(ids);
        let mut rollback = RollbackTable::new();
        for id in ids {
            if !id.is_pending() {
                rollback.save_task(&self.board, id);
            }
        }
        for id in ids {
            self.board.take_task(id);
            if self.panel_task.as_ref() == Some(id) {
                self.close_panel();
            }
        }
        self.board.prune_selection();
        self.note_skipped(&skipped).await;

        let outcome = BulkOutcome { submitted, skipped };
        if outcome.submitted.is_empty() {
            return Ok(outcome);
        }
        match self.remote.bulk_delete(&outcome.submitted).await {
            Ok(()) => Ok(outcome),
            Err(err) => {
                rollback.restore(&mut self.board);
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("bulk_delete", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Apply one patch to the whole working set. Draft rows take the edit
    /// locally but are excluded from the remote call.
    pub async fn bulk_update(&mut self, ids: &[TaskId], patch: TaskPatch) -> Result<BulkOutcome> {
        if patch.is_empty() {
            return Ok(BulkOutcome {
                submitted: Vec::new(),
                skipped: Vec::new(),
            });
        }
        let (submitted, skipped) = self.partition_bulk(ids);
        let mut rollback = RollbackTable::new();
        for id in ids {
            if !id.is_pending() {
                rollback.save_task(&self.board, id);
            }
        }
        for id in ids {
            let vocab = self
                .board
                .section_of(id)
                .map(|s| (s.completed_value(), s.initial_status()));
            if let Some((completed, fallback)) = vocab {
                if let Some(task) = self.board.task_mut(id) {
                    patch.apply(task, &completed, &fallback);
                }
            }
            self.sync_panel(id);
        }
        self.note_skipped(&skipped).await;

        let outcome = BulkOutcome { submitted, skipped };
        if outcome.submitted.is_empty() {
            return Ok(outcome);
        }
        match self.remote.bulk_update(&outcome.submitted, &patch).await {
            Ok(()) => Ok(outcome),
            Err(err) => {
                rollback.restore(&mut self.board);
                self.refresh_panel();
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("bulk_update", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Move the whole working set to the head of another section.
    pub async fn bulk_change_section(&mut self, ids: &[TaskId], dest_id: u64) -> Result<BulkOutcome> {
        if self.board.section(dest_id).is_none() {
            return Err(EngineError::SectionNotFound(dest_id));
        }
        let (submitted, skipped) = self.partition_bulk(ids);
        let mut rollback = RollbackTable::new();
        for id in ids {
            if !id.is_pending() {
                rollback.save_task(&self.board, id);
            }
        }
        for id in ids {
            match self.board.section_of(id) {
                Some(section) if section.id != dest_id => {}
                _ => continue,
            }
            let head_order = self
                .board
                .section(dest_id)
                .and_then(|s| s.tasks.first().map(|t| t.order));
            if let Some(mut task) = self.board.take_task(id) {
                task.section_id = dest_id;
                task.order = interpolate(None, head_order);
                self.board.insert_task(dest_id, 0, task);
            }
        }
        self.note_skipped(&skipped).await;

        let outcome = BulkOutcome { submitted, skipped };
        if outcome.submitted.is_empty() {
            return Ok(outcome);
        }
        match self
            .remote
            .bulk_change_section(&outcome.submitted, dest_id)
            .await
        {
            Ok(()) => Ok(outcome),
            Err(err) => {
                rollback.restore(&mut self.board);
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("bulk_change_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    // --- section mutations ---

    /// Sections are not created optimistically; the row appears only once
    /// the server has assigned its id.
    pub async fn create_section(&mut self, name: &str) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("section name is empty".into()));
        }
        match self.remote.create_section(self.config.project_id, name).await {
            Ok(section) => {
                let id = section.id;
                self.board.push_section(section);
                Ok(id)
            }
            Err(err) => {
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("create_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    pub async fn rename_section(&mut self, id: u64, name: &str) -> Result<UpdateOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("section name is empty".into()));
        }
        match self.board.section(id) {
            Some(section) if section.name == name => return Ok(UpdateOutcome::NoOp),
            Some(_) => {}
            None => return Err(EngineError::SectionNotFound(id)),
        }

        let mut rollback = RollbackTable::new();
        rollback.save_section(&self.board, id);
        if let Some(section) = self.board.section_mut(id) {
            section.name = name.to_string();
        }

        let patch = SectionPatch {
            name: Some(name.to_string()),
            order: None,
        };
        match self.remote.update_section(id, &patch).await {
            Ok(server) => {
                if let Some(section) = self.board.section_mut(id) {
                    section.name = server.name;
                }
                Ok(UpdateOutcome::Applied)
            }
            Err(err) => {
                if self.board.section(id).is_some() {
                    rollback.restore(&mut self.board);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("rename_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Drag a section to a new position in the board.
    pub async fn reorder_section(&mut self, id: u64, index: usize) -> Result<()> {
        let order = {
            if self.board.section_index(id).is_none() {
                return Err(EngineError::SectionNotFound(id));
            }
            let visible: Vec<_> = self
                .board
                .sections()
                .iter()
                .filter(|s| s.id != id)
                .collect();
            let at = index.min(visible.len());
            let prev = at.checked_sub(1).and_then(|i| visible.get(i)).map(|s| s.order);
            let next = visible.get(at).map(|s| s.order);
            interpolate(prev, next)
        };

        let mut rollback = RollbackTable::new();
        rollback.save_section(&self.board, id);
        self.board.move_section(id, index);
        if let Some(section) = self.board.section_mut(id) {
            section.order = order;
        }

        let patch = SectionPatch {
            name: None,
            order: Some(order),
        };
        match self.remote.update_section(id, &patch).await {
            Ok(_) => Ok(()),
            Err(err) => {
                if self.board.section(id).is_some() {
                    rollback.restore(&mut self.board);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("reorder_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Flip a section's collapsed state. Collapsing discards its loaded page
    /// and cursor; expanding fetches a fresh first page once the toggle is
    /// confirmed. Returns the confirmed collapsed state.
    pub async fn toggle_collapse(&mut self, id: u64) -> Result<bool> {
        let mut rollback = RollbackTable::new();
        if !rollback.save_section(&self.board, id) {
            return Err(EngineError::SectionNotFound(id));
        }
        let collapsed_now = match self.board.section_mut(id) {
            Some(section) => {
                section.collapsed = !section.collapsed;
                if section.collapsed {
                    section.tasks.clear();
                    section.cursor.clear();
                    section.loading = false;
                }
                section.collapsed
            }
            None => return Err(EngineError::SectionNotFound(id)),
        };
        if collapsed_now {
            self.board.prune_selection();
        }

        match self.remote.toggle_section_collapse(id).await {
            Ok(server_collapsed) => {
                if server_collapsed != collapsed_now {
                    // server disagrees; its state wins
                    if let Some(section) = self.board.section_mut(id) {
                        section.collapsed = server_collapsed;
                        if server_collapsed {
                            section.tasks.clear();
                            section.cursor.clear();
                        }
                    }
                }
                if !server_collapsed {
                    if let Err(err) = self.load_task_page(id).await {
                        warn!(section_id = id, "page fetch after expand failed: {err}");
                    }
                }
                Ok(server_collapsed)
            }
            Err(err) => {
                if self.board.section(id).is_some() {
                    rollback.restore(&mut self.board);
                }
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("toggle_collapse", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Remove a section optimistically. A remote 404 counts as success.
    pub async fn delete_section(&mut self, id: u64, mode: SectionDeleteMode) -> Result<()> {
        let mut rollback = RollbackTable::new();
        if !rollback.save_section(&self.board, id) {
            return Err(EngineError::SectionNotFound(id));
        }
        self.board.remove_section(id);
        if let Some(panel_id) = self.panel_task.clone() {
            if self.board.task(&panel_id).is_none() {
                self.close_panel();
            }
        }

        match self.remote.delete_section(id, mode).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => {
                rollback.restore(&mut self.board);
                let msg = err.to_string();
                self.emit(EngineEvent::mutation_failed("delete_section", msg))
                    .await;
                Err(err.into())
            }
        }
    }

    // --- pagination ---

    /// Fetch the next page of the section list and merge it. Sections
    /// already on the board keep their loaded tasks and cursors.
    pub async fn load_sections(&mut self) -> Result<()> {
        if self.board.cursor.is_loaded() && !self.board.cursor.has_next {
            return Ok(());
        }
        let page = self.board.cursor.current_page + 1;
        let filters = self.filters.clone();
        let fetched = self
            .remote
            .list_sections(self.config.project_id, &filters, page, self.config.section_page_size)
            .await?;
        self.board.cursor = PageCursor {
            count: fetched.count,
            has_next: fetched.next,
            current_page: page,
        };
        self.board.merge_sections(fetched.sections);
        Ok(())
    }

    /// Fetch the next task page for a section: the first page replaces (so
    /// drafts survive in front), later pages append with id de-duplication.
    /// A section already loading, collapsed, or fully loaded is a no-op.
    pub async fn load_task_page(&mut self, section_id: u64) -> Result<()> {
        let (page, busy) = match self.board.section(section_id) {
            Some(section) => {
                let exhausted = section.cursor.is_loaded() && !section.cursor.has_next;
                (
                    section.cursor.current_page + 1,
                    section.loading || section.collapsed || exhausted,
                )
            }
            None => return Err(EngineError::SectionNotFound(section_id)),
        };
        if busy {
            return Ok(());
        }
        if let Some(section) = self.board.section_mut(section_id) {
            section.loading = true;
        }

        let filters = self.filters.clone();
        let result = self
            .remote
            .list_tasks(section_id, &filters, page, self.config.page_size)
            .await;

        let Some(section) = self.board.section_mut(section_id) else {
            // vanished while the fetch was in flight
            return Ok(());
        };
        section.loading = false;
        match result {
            Ok(fetched) => {
                let count = fetched.count;
                section.cursor = PageCursor {
                    count,
                    has_next: fetched.next,
                    current_page: page,
                };
                let mode = if page == 1 { MergeMode::Replace } else { MergeMode::Append };
                merge_page(section, fetched.tasks, mode);
                self.emit(EngineEvent::section_refreshed(section_id, count)).await;
                Ok(())
            }
            Err(err) => {
                let msg = err.to_string();
                self.emit(EngineEvent::section_refresh_failed(section_id, msg))
                    .await;
                Err(err.into())
            }
        }
    }

    // --- filter dispatch ---

    /// Apply a new filter state: refetch the first task page of every
    /// expanded section under the new filters, in bounded concurrent
    /// batches, then replace the baseline and persist it.
    ///
    /// A dispatch arriving while one runs is dropped. A dispatch whose
    /// filters deep-equal the baseline (with every expanded section already
    /// loaded) is skipped without any remote call.
    pub async fn apply_filters(&mut self, new: FilterState) -> Result<DispatchOutcome> {
        if self.dispatch_in_flight {
            self.emit(EngineEvent::FiltersDropped).await;
            return Ok(DispatchOutcome::Dropped);
        }
        if dispatch::can_skip(&self.board, &self.filters, &new) {
            return Ok(DispatchOutcome::Skipped);
        }
        self.dispatch_in_flight = true;

        let targets = self.board.expanded_sections();
        let batches = dispatch::batches(&targets, self.config.dispatch_batch_size);
        let total = batches.len();
        for (i, batch) in batches.into_iter().enumerate() {
            for &sid in &batch {
                if let Some(section) = self.board.section_mut(sid) {
                    section.loading = true;
                }
            }
            let page_size = self.config.page_size;
            let futures = batch.iter().map(|&sid| {
                let remote = Arc::clone(&self.remote);
                let filters = new.clone();
                async move { (sid, remote.list_tasks(sid, &filters, 1, page_size).await) }
            });
            let results = join_all(futures).await;

            for (sid, result) in results {
                let event = match result {
                    Ok(fetched) => match self.board.section_mut(sid) {
                        Some(section) => {
                            section.loading = false;
                            let count = fetched.count;
                            section.cursor = PageCursor {
                                count,
                                has_next: fetched.next,
                                current_page: 1,
                            };
                            merge_page(section, fetched.tasks, MergeMode::Replace);
                            Some(EngineEvent::section_refreshed(sid, count))
                        }
                        None => None,
                    },
                    Err(err) => {
                        if let Some(section) = self.board.section_mut(sid) {
                            section.loading = false;
                        }
                        Some(EngineEvent::section_refresh_failed(sid, err.to_string()))
                    }
                };
                if let Some(event) = event {
                    self.emit(event).await;
                }
            }

            if i + 1 < total && self.config.dispatch_batch_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.dispatch_batch_delay_ms)).await;
            }
        }

        // the baseline moves even if individual sections failed; they carry
        // their own refresh-failed events
        self.filters = new;
        if let Err(err) = self.persist.save_filters(&self.filters) {
            warn!("failed to persist filters: {err:#}");
        }
        self.board.prune_selection();
        self.dispatch_in_flight = false;
        self.emit(EngineEvent::FiltersApplied).await;
        Ok(DispatchOutcome::Applied)
    }

    /// Filters saved by a previous session, if any.
    pub fn saved_filters(&self) -> Option<FilterState> {
        match self.persist.load_filters() {
            Ok(filters) => filters,
            Err(err) => {
                warn!("failed to load saved filters: {err:#}");
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_dispatch_in_flight(&mut self, value: bool) {
        self.dispatch_in_flight = value;
    }

    // --- selection & detail panel ---

    pub fn select_task(&mut self, id: &TaskId) -> bool {
        if self.board.task(id).is_none() {
            return false;
        }
        self.board.select(id.clone());
        true
    }

    pub fn deselect_task(&mut self, id: &TaskId) {
        self.board.deselect(id);
    }

    /// Show a task in the detail panel and persist its snapshot.
    pub fn open_panel(&mut self, id: &TaskId) -> bool {
        if self.board.task(id).is_none() {
            return false;
        }
        self.panel_task = Some(id.clone());
        self.persist_panel();
        true
    }

    /// Close the panel and clear the persisted record.
    pub fn close_panel(&mut self) {
        self.panel_task = None;
        if let Err(err) = self.persist.clear_panel() {
            warn!("failed to clear panel state: {err:#}");
        }
    }

    pub fn panel_task(&self) -> Option<&TaskId> {
        self.panel_task.as_ref()
    }

    /// Panel record saved by a previous session, if any.
    pub fn saved_panel(&self) -> Option<PanelState> {
        match self.persist.load_panel() {
            Ok(panel) => panel,
            Err(err) => {
                warn!("failed to load panel state: {err:#}");
                None
            }
        }
    }

    /// Rewrite the persisted panel snapshot from the board. Best-effort;
    /// failures are logged and never surface into the mutation pipeline.
    fn persist_panel(&self) {
        let state = PanelState {
            selected: self
                .panel_task
                .as_ref()
                .and_then(|id| self.board.task(id).cloned()),
            is_open: self.panel_task.is_some(),
        };
        if let Err(err) = self.persist.save_panel(&state) {
            warn!("failed to persist panel state: {err:#}");
        }
    }

    fn sync_panel(&self, id: &TaskId) {
        if self.panel_task.as_ref() == Some(id) {
            self.persist_panel();
        }
    }

    fn refresh_panel(&self) {
        if self.panel_task.is_some() {
            self.persist_panel();
        }
    }
}
