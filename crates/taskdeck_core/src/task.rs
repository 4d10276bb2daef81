use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Task identity. A task holds exactly one of the two forms at any time:
/// `Pending` is a client-generated placeholder that exists only until the
/// remote create call is confirmed; `Persisted` is the server-assigned id.
/// A `Pending` id is never a valid update target on the remote side.
///
/// On the wire a persisted id is a plain number and a pending id a UUID
/// string, so the two variants stay unambiguous in JSON as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Persisted(u64),
    Pending(String),
}

impl TaskId {
    /// Generate a fresh placeholder id (UUID v4, distinct from any numeric server id).
    pub fn pending() -> Self {
        Self::Pending(uuid::Uuid::new_v4().to_string())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The server-assigned id, if this task has been persisted.
    pub fn persisted(&self) -> Option<u64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(local) => write!(f, "pending:{}", local),
            Self::Persisted(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(CoreError::Validation(format!("unknown priority: {other}"))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub file_name: String,
    pub url: String,
}

/// A task row as the UI sees it. `tasks` arrays hold these in presentation
/// order; `order` is the fractional sort key the server knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Status value drawn from the owning section's vocabulary.
    pub status: String,
    #[serde(default)]
    pub is_complete: bool,
    /// Date-only, no time component.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignees: Vec<u64>,
    #[serde(default)]
    pub collaborators: Vec<u64>,
    #[serde(default)]
    pub liked_by: BTreeSet<u64>,
    #[serde(default)]
    pub seen_by: BTreeSet<u64>,
    #[serde(default)]
    pub allocated_hours: Option<f64>,
    #[serde(default)]
    pub subtask_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Parent task, set when this task was converted into a subtask.
    #[serde(default)]
    pub parent: Option<u64>,
    pub order: f64,
    pub section_id: u64,
}

impl Task {
    /// A not-yet-persisted draft row, inserted optimistically.
    pub fn draft(section_id: u64, name: impl Into<String>, status: impl Into<String>, order: f64) -> Self {
        Self {
            id: TaskId::pending(),
            name: name.into(),
            description: None,
            priority: Priority::default(),
            status: status.into(),
            is_complete: false,
            due_date: None,
            assignees: Vec::new(),
            collaborators: Vec::new(),
            liked_by: BTreeSet::new(),
            seen_by: BTreeSet::new(),
            allocated_hours: None,
            subtask_count: 0,
            comment_count: 0,
            attachments: Vec::new(),
            parent: None,
            order,
            section_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<u64>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Whether this row is an unconfirmed optimistic placeholder.
    pub fn is_optimistic(&self) -> bool {
        self.id.is_pending()
    }

    /// Set the status value, keeping `is_complete` consistent with the
    /// vocabulary's completed entry.
    pub fn set_status(&mut self, value: impl Into<String>, completed_value: &str) {
        self.status = value.into();
        self.is_complete = self.status == completed_value;
    }

    /// Mark complete: status snaps to the vocabulary's completed entry.
    pub fn mark_complete(&mut self, completed_value: &str) {
        self.status = completed_value.to_string();
        self.is_complete = true;
    }

    /// Mark incomplete: status falls back to the given value if it still
    /// points at the completed entry.
    pub fn mark_incomplete(&mut self, completed_value: &str, fallback: &str) {
        if self.status == completed_value {
            self.status = fallback.to_string();
        }
        self.is_complete = false;
    }
}
