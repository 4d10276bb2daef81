use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// One entry of a status vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusOption {
    pub value: String,
    pub label: String,
    pub color: String,
}

impl StatusOption {
    pub fn new(value: &str, label: &str, color: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// The default 5-value vocabulary, used when a project defines none of its own.
pub fn default_status_options() -> Vec<StatusOption> {
    vec![
        StatusOption::new("not-started", "Not started", "#6b7280"),
        StatusOption::new("in-progress", "In progress", "#3b82f6"),
        StatusOption::new("completed", "Completed", "#22c55e"),
        StatusOption::new("pending", "Pending", "#eab308"),
        StatusOption::new("on-hold", "On hold", "#ef4444"),
    ]
}

/// Per-section (and per-axis) pagination state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    pub count: u64,
    pub has_next: bool,
    /// 0 means no page has been loaded yet.
    pub current_page: u32,
}

impl PageCursor {
    pub fn is_loaded(&self) -> bool {
        self.current_page > 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A named, ordered bucket of tasks.
///
/// `tasks` is presentation order as the API returned it (plus optimistic
/// inserts); it is never re-sorted locally. The cursor, loading flag and
/// task list are client-side state and absent from the wire representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    pub order: f64,
    #[serde(default)]
    pub collapsed: bool,
    /// Project-specific vocabulary; `None` falls back to the default set.
    #[serde(default)]
    pub status_options: Option<Vec<StatusOption>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing)]
    pub loading: bool,
    #[serde(default, skip_serializing)]
    pub cursor: PageCursor,
}

impl Section {
    pub fn new(id: u64, name: impl Into<String>, order: f64) -> Self {
        Self {
            id,
            name: name.into(),
            order,
            collapsed: false,
            status_options: None,
            tasks: Vec::new(),
            loading: false,
            cursor: PageCursor::default(),
        }
    }

    /// The effective vocabulary for tasks in this section.
    pub fn status_options(&self) -> Vec<StatusOption> {
        self.status_options
            .clone()
            .unwrap_or_else(default_status_options)
    }

    /// The vocabulary value that means "completed".
    pub fn completed_value(&self) -> String {
        self.status_options()
            .iter()
            .find(|o| o.value == "completed" || o.label.eq_ignore_ascii_case("completed"))
            .map(|o| o.value.clone())
            .unwrap_or_else(|| "completed".to_string())
    }

    /// The vocabulary value new tasks start in.
    pub fn initial_status(&self) -> String {
        self.status_options()
            .first()
            .map(|o| o.value.clone())
            .unwrap_or_else(|| "not-started".to_string())
    }

    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    pub fn is_expanded(&self) -> bool {
        !self.collapsed
    }
}
