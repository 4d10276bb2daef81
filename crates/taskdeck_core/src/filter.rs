use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// The filter set downstream refetches react to.
///
/// Equality is deep (derived `PartialEq`); the dispatch orchestrator uses it
/// to short-circuit refetches when nothing actually changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_after: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_before: Option<NaiveDate>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_assignee(mut self, assignee: u64) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<String>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_due_range(mut self, after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        self.due_after = after;
        self.due_before = before;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(FilterState::default().is_empty());
        assert!(!FilterState::default().with_search("report").is_empty());
    }

    #[test]
    fn test_deep_equality() {
        let a = FilterState::default()
            .with_search("q")
            .with_statuses(vec!["pending".into(), "on-hold".into()]);
        let b = FilterState::default()
            .with_search("q")
            .with_statuses(vec!["pending".into(), "on-hold".into()]);
        assert_eq!(a, b);

        let c = b.clone().with_assignee(3);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_skips_empty_fields() {
        let json = serde_json::to_string(&FilterState::default()).unwrap();
        assert_eq!(json, "{}");

        let restored: FilterState = serde_json::from_str("{}").unwrap();
        assert!(restored.is_empty());
    }
}
