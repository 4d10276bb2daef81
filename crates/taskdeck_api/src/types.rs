//! Wire types shared between the engine and the remote boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use taskdeck_core::{Priority, Section, Task};

/// One fetched page of tasks for a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub count: u64,
    pub next: bool,
}

/// One fetched page of the section list itself (the other pagination axis).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPage {
    pub sections: Vec<Section>,
    pub count: u64,
    pub next: bool,
}

/// Body of a create-task call, built from the optimistic draft row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub assignees: Vec<u64>,
    pub order: f64,
}

impl TaskPayload {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status.clone(),
            due_date: task.due_date,
            assignees: task.assignees.clone(),
            order: task.order,
        }
    }
}

/// Partial update body. Every field is optional; an absent field is left
/// untouched on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn complete(mut self, is_complete: bool) -> Self {
        self.is_complete = Some(is_complete);
        self
    }

    pub fn due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn assignees(mut self, assignees: Vec<u64>) -> Self {
        self.assignees = Some(assignees);
        self
    }

    /// Whether every field this patch sets already equals the task's current
    /// value. Dates compare at day granularity (the only granularity stored)
    /// and lists element-wise. Used to skip redundant remote calls.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref name) = self.name {
            if *name != task.name {
                return false;
            }
        }
        if let Some(ref description) = self.description {
            if task.description.as_deref() != Some(description.as_str()) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if priority != task.priority {
                return false;
            }
        }
        if let Some(ref status) = self.status {
            if *status != task.status {
                return false;
            }
        }
        if let Some(is_complete) = self.is_complete {
            if is_complete != task.is_complete {
                return false;
            }
        }
        if let Some(due) = self.due_date {
            if task.due_date != Some(due) {
                return false;
            }
        }
        if let Some(ref assignees) = self.assignees {
            if *assignees != task.assignees {
                return false;
            }
        }
        if let Some(ref collaborators) = self.collaborators {
            if *collaborators != task.collaborators {
                return false;
            }
        }
        if let Some(hours) = self.allocated_hours {
            if task.allocated_hours != Some(hours) {
                return false;
            }
        }
        if let Some(parent) = self.parent {
            if task.parent != Some(parent) {
                return false;
            }
        }
        true
    }

    /// Apply this patch to a local row, keeping the completed flag and the
    /// status value mutually consistent.
    pub fn apply(&self, task: &mut Task, completed_value: &str, fallback_status: &str) {
        if let Some(ref name) = self.name {
            task.name = name.clone();
        }
        if let Some(ref description) = self.description {
            task.description = Some(description.clone());
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(ref status) = self.status {
            task.set_status(status.clone(), completed_value);
        }
        if let Some(is_complete) = self.is_complete {
            if is_complete {
                task.mark_complete(completed_value);
            } else {
                task.mark_incomplete(completed_value, fallback_status);
            }
        }
        if let Some(due) = self.due_date {
            task.due_date = Some(due);
        }
        if let Some(ref assignees) = self.assignees {
            task.assignees = assignees.clone();
        }
        if let Some(ref collaborators) = self.collaborators {
            task.collaborators = collaborators.clone();
        }
        if let Some(hours) = self.allocated_hours {
            task.allocated_hours = Some(hours);
        }
        if let Some(parent) = self.parent {
            task.parent = Some(parent);
        }
    }

    /// Merge the server-confirmed entity into a possibly-further-mutated
    /// local row: only the fields this patch submitted are overwritten, so
    /// edits made while the call was in flight are not clobbered.
    pub fn merge_confirmed(&self, local: &mut Task, server: &Task) {
        if self.name.is_some() {
            local.name = server.name.clone();
        }
        if self.description.is_some() {
            local.description = server.description.clone();
        }
        if self.priority.is_some() {
            local.priority = server.priority;
        }
        if self.status.is_some() || self.is_complete.is_some() {
            local.status = server.status.clone();
            local.is_complete = server.is_complete;
        }
        if self.due_date.is_some() {
            local.due_date = server.due_date;
        }
        if self.assignees.is_some() {
            local.assignees = server.assignees.clone();
        }
        if self.collaborators.is_some() {
            local.collaborators = server.collaborators.clone();
        }
        if self.allocated_hours.is_some() {
            local.allocated_hours = server.allocated_hours;
        }
        if self.parent.is_some() {
            local.parent = server.parent;
        }
    }
}

/// Rename / display-order body for a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

/// Real-id neighbors around an insertion point, for cross-section moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertionNeighbors {
    pub before: Option<u64>,
    pub after: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionDeleteMode {
    /// Delete the section and every task in it.
    WithTasks,
    /// Delete the section only; its tasks become unsectioned.
    SectionOnly,
}

impl SectionDeleteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionDeleteMode::WithTasks => "with_tasks",
            SectionDeleteMode::SectionOnly => "section_only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::Task;

    fn sample_task() -> Task {
        let mut task = Task::draft(1, "ship release", "in-progress", 3.0)
            .with_description("cut the tag")
            .with_assignees(vec![4, 5]);
        task.set_status("in-progress", "completed");
        task
    }

    #[test]
    fn test_empty_patch_matches_everything() {
        let task = sample_task();
        assert!(TaskPatch::default().is_empty());
        assert!(TaskPatch::default().matches(&task));
    }

    #[test]
    fn test_matches_per_field() {
        let task = sample_task();
        assert!(TaskPatch::default().name("ship release").matches(&task));
        assert!(!TaskPatch::default().name("ship hotfix").matches(&task));
        assert!(TaskPatch::default().assignees(vec![4, 5]).matches(&task));
        assert!(!TaskPatch::default().assignees(vec![5, 4]).matches(&task));
    }

    #[test]
    fn test_matches_date_at_day_granularity() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let task = sample_task().with_due_date(due);
        assert!(TaskPatch::default().due_date(due).matches(&task));
        let other = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(!TaskPatch::default().due_date(other).matches(&task));
    }

    #[test]
    fn test_apply_keeps_complete_flag_consistent() {
        let mut task = sample_task();
        TaskPatch::default().complete(true).apply(&mut task, "completed", "not-started");
        assert!(task.is_complete);
        assert_eq!(task.status, "completed");

        TaskPatch::default().complete(false).apply(&mut task, "completed", "not-started");
        assert!(!task.is_complete);
        assert_eq!(task.status, "not-started");

        TaskPatch::default().status("completed").apply(&mut task, "completed", "not-started");
        assert!(task.is_complete);
    }

    #[test]
    fn test_merge_confirmed_only_touches_submitted_fields() {
        let mut local = sample_task();
        // user kept typing while the call was in flight
        local.name = "ship release v2".to_string();

        let mut server = sample_task();
        server.name = "ship release".to_string();
        server.priority = Priority::High;

        let patch = TaskPatch::default().priority(Priority::High);
        patch.merge_confirmed(&mut local, &server);

        assert_eq!(local.priority, Priority::High);
        assert_eq!(local.name, "ship release v2");
    }

    #[test]
    fn test_payload_from_task() {
        let task = sample_task();
        let payload = TaskPayload::from_task(&task);
        assert_eq!(payload.name, task.name);
        assert_eq!(payload.order, task.order);
        assert_eq!(payload.assignees, vec![4, 5]);
    }

    #[test]
    fn test_patch_serializes_sparsely() {
        let json = serde_json::to_string(&TaskPatch::default().name("x")).unwrap();
        assert_eq!(json, r#"{"name":"x"}"#);
    }
}
