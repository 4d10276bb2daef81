//! The entity store: sections, their task lists, and the selection set.
//!
//! All mutation here is synchronous; the engine suspends only at the remote
//! boundary, so no caller ever observes a torn intermediate state.

use std::collections::HashSet;

use taskdeck_core::{PageCursor, Section, Task, TaskId};

/// In-memory copy of the board a UI renders from.
#[derive(Debug, Default)]
pub struct Board {
    pub project_id: u64,
    sections: Vec<Section>,
    selection: HashSet<TaskId>,
    /// Cursor for the section-list axis, independent of any per-section
    /// task cursor.
    pub cursor: PageCursor,
}

impl Board {
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            ..Self::default()
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: u64) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: u64) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: u64) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn insert_section(&mut self, index: usize, section: Section) {
        let at = index.min(self.sections.len());
        self.sections.insert(at, section);
    }

    /// Move a section to a new position in the list. Returns false when the
    /// section is not loaded.
    pub fn move_section(&mut self, id: u64, index: usize) -> bool {
        match self.section_index(id) {
            Some(from) => {
                let section = self.sections.remove(from);
                let at = index.min(self.sections.len());
                self.sections.insert(at, section);
                true
            }
            None => false,
        }
    }

    pub fn remove_section(&mut self, id: u64) -> Option<(usize, Section)> {
        let index = self.section_index(id)?;
        let section = self.sections.remove(index);
        for task in &section.tasks {
            self.selection.remove(&task.id);
        }
        Some((index, section))
    }

    /// Merge one fetched page of the section list. Known sections keep their
    /// loaded tasks, cursor and loading flag; only server-owned attributes
    /// are refreshed. Unknown sections are appended in arrival order.
    pub fn merge_sections(&mut self, fetched: Vec<Section>) {
        for incoming in fetched {
            match self.section_mut(incoming.id) {
                Some(existing) => {
                    existing.name = incoming.name;
                    existing.order = incoming.order;
                    existing.collapsed = incoming.collapsed;
                    existing.status_options = incoming.status_options;
                }
                None => self.sections.push(incoming),
            }
        }
    }

    pub fn find_task(&self, id: &TaskId) -> Option<(usize, usize)> {
        for (si, section) in self.sections.iter().enumerate() {
            if let Some(ti) = section.position_of(id) {
                return Some((si, ti));
            }
        }
        None
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        let (si, ti) = self.find_task(id)?;
        Some(&self.sections[si].tasks[ti])
    }

    /// The section currently holding a task.
    pub fn section_of(&self, id: &TaskId) -> Option<&Section> {
        let (si, _) = self.find_task(id)?;
        Some(&self.sections[si])
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        for section in &mut self.sections {
            if let Some(task) = section.find_task_mut(id) {
                return Some(task);
            }
        }
        None
    }

    /// Remove a task from whichever section holds it.
    pub fn take_task(&mut self, id: &TaskId) -> Option<Task> {
        let (si, ti) = self.find_task(id)?;
        Some(self.sections[si].tasks.remove(ti))
    }

    pub fn insert_task(&mut self, section_id: u64, index: usize, task: Task) -> bool {
        match self.section_mut(section_id) {
            Some(section) => {
                let at = index.min(section.tasks.len());
                section.tasks.insert(at, task);
                true
            }
            None => false,
        }
    }

    /// Ids of sections whose task pages are currently visible.
    pub fn expanded_sections(&self) -> Vec<u64> {
        self.sections
            .iter()
            .filter(|s| s.is_expanded())
            .map(|s| s.id)
            .collect()
    }

    // --- selection set ---

    pub fn select(&mut self, id: TaskId) {
        self.selection.insert(id);
    }

    pub fn deselect(&mut self, id: &TaskId) {
        self.selection.remove(id);
    }

    pub fn is_selected(&self, id: &TaskId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected(&self) -> Vec<TaskId> {
        self.selection.iter().cloned().collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop selection entries whose tasks left the visible set.
    pub fn prune_selection(&mut self) {
        let present: HashSet<TaskId> = self
            .sections
            .iter()
            .flat_map(|s| s.tasks.iter().map(|t| t.id.clone()))
            .collect();
        self.selection.retain(|id| present.contains(id));
    }

    /// Migrate selection membership from a placeholder id to the real one.
    pub fn migrate_selection(&mut self, temp: &TaskId, real: &TaskId) {
        if self.selection.remove(temp) {
            self.selection.insert(real.clone());
        }
    }
}

/// Pre-mutation snapshots, keyed by entity, taken before an intent touches
/// the board and replayed verbatim on remote failure.
#[derive(Debug, Default)]
pub(crate) struct RollbackTable {
    tasks: Vec<SavedTask>,
    sections: Vec<SavedSection>,
}

#[derive(Debug)]
struct SavedTask {
    section_id: u64,
    index: usize,
    task: Task,
}

#[derive(Debug)]
struct SavedSection {
    index: usize,
    section: Section,
}

impl RollbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a task and its position. Returns false if it is not loaded.
    pub fn save_task(&mut self, board: &Board, id: &TaskId) -> bool {
        match board.find_task(id) {
            Some((si, ti)) => {
                let section = &board.sections[si];
                self.tasks.push(SavedTask {
                    section_id: section.id,
                    index: ti,
                    task: section.tasks[ti].clone(),
                });
                true
            }
            None => false,
        }
    }

    /// Snapshot a whole section (including its loaded tasks) and its position.
    pub fn save_section(&mut self, board: &Board, id: u64) -> bool {
        match board.section_index(id) {
            Some(index) => {
                self.sections.push(SavedSection {
                    index,
                    section: board.sections[index].clone(),
                });
                true
            }
            None => false,
        }
    }

    /// Restore every snapshotted entity. Sections first, then tasks in
    /// ascending original index so multi-task snapshots rebuild correctly.
    pub fn restore(mut self, board: &mut Board) {
        for saved in self.sections.drain(..) {
            // remove whatever position the section moved to first
            if let Some(i) = board.section_index(saved.section.id) {
                board.sections.remove(i);
            }
            board.insert_section(saved.index, saved.section);
        }

        self.tasks.sort_by_key(|s| (s.section_id, s.index));
        for saved in self.tasks.drain(..) {
            // remove whatever state the task is in now, wherever it moved;
            // if the origin section itself vanished there is nothing to
            // restore into
            board.take_task(&saved.task.id);
            board.insert_task(saved.section_id, saved.index, saved.task);
        }
    }
}
