use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Events the engine streams to subscribers (toast display, list badges,
/// anything that wants to react without polling the board).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    TaskCreated {
        section_id: u64,
        task_id: TaskId,
    },

    /// A placeholder row was confirmed and swapped for the real entity.
    TaskConfirmed {
        temp_id: TaskId,
        task_id: TaskId,
    },

    MutationFailed {
        intent: String,
        error: String,
    },

    /// Pending ids excluded from a bulk remote call.
    BulkSkipped {
        skipped: Vec<TaskId>,
    },

    SectionRefreshed {
        section_id: u64,
        count: u64,
    },

    SectionRefreshFailed {
        section_id: u64,
        error: String,
    },

    FiltersApplied,

    /// A filter dispatch arrived while another was in flight and was dropped.
    FiltersDropped,

    Notice {
        message: String,
    },
}

impl EngineEvent {
    pub fn task_created(section_id: u64, task_id: TaskId) -> Self {
        EngineEvent::TaskCreated { section_id, task_id }
    }

    pub fn task_confirmed(temp_id: TaskId, task_id: TaskId) -> Self {
        EngineEvent::TaskConfirmed { temp_id, task_id }
    }

    pub fn mutation_failed(intent: impl Into<String>, error: impl Into<String>) -> Self {
        EngineEvent::MutationFailed {
            intent: intent.into(),
            error: error.into(),
        }
    }

    pub fn bulk_skipped(skipped: Vec<TaskId>) -> Self {
        EngineEvent::BulkSkipped { skipped }
    }

    pub fn section_refreshed(section_id: u64, count: u64) -> Self {
        EngineEvent::SectionRefreshed { section_id, count }
    }

    pub fn section_refresh_failed(section_id: u64, error: impl Into<String>) -> Self {
        EngineEvent::SectionRefreshFailed {
            section_id,
            error: error.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        EngineEvent::Notice {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_confirmed_serialization() {
        let event = EngineEvent::task_confirmed(TaskId::pending(), TaskId::Persisted(501));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"task_confirmed"#));
        assert!(json.contains(r#""task_id":501"#));
    }

    #[test]
    fn test_mutation_failed_serialization() {
        let event = EngineEvent::mutation_failed("update_task", "conflict");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"mutation_failed"#));
        assert!(json.contains("conflict"));
    }

    #[test]
    fn test_filters_dropped_round_trip() {
        let json = serde_json::to_string(&EngineEvent::FiltersDropped).unwrap();
        assert_eq!(json, r#"{"type":"filters_dropped"}"#);
        let decoded: EngineEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(decoded, EngineEvent::FiltersDropped));
    }

    #[test]
    fn test_all_events_serializable() {
        let events = vec![
            EngineEvent::task_created(1, TaskId::pending()),
            EngineEvent::task_confirmed(TaskId::pending(), TaskId::Persisted(2)),
            EngineEvent::mutation_failed("delete_task", "boom"),
            EngineEvent::bulk_skipped(vec![TaskId::pending()]),
            EngineEvent::section_refreshed(1, 40),
            EngineEvent::section_refresh_failed(1, "timeout"),
            EngineEvent::FiltersApplied,
            EngineEvent::FiltersDropped,
            EngineEvent::notice("2 unsaved tasks were skipped"),
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let _decoded: EngineEvent = serde_json::from_str(&json).unwrap();
        }
    }
}
