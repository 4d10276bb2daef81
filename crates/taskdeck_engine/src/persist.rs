//! The persistence port for best-effort UI state.
//!
//! The engine calls this on selection changes and filter application;
//! failures are logged and swallowed (fire-and-forget), never surfaced to
//! the mutation pipeline.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

use taskdeck_core::db::{self, PanelState};
use taskdeck_core::FilterState;

pub trait UiStatePort: Send + Sync {
    fn save_panel(&self, panel: &PanelState) -> Result<()>;
    fn load_panel(&self) -> Result<Option<PanelState>>;
    fn clear_panel(&self) -> Result<()>;
    fn save_filters(&self, filters: &FilterState) -> Result<()>;
    fn load_filters(&self) -> Result<Option<FilterState>>;
}

/// SQLite-backed port over the project-local `.taskdeck/` DB. A connection
/// is opened per call; writes are rare (selection changes) and WAL keeps
/// them cheap.
pub struct SqliteUiState {
    project_root: PathBuf,
}

impl SqliteUiState {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }
}

impl UiStatePort for SqliteUiState {
    fn save_panel(&self, panel: &PanelState) -> Result<()> {
        let conn = db::open_db(&self.project_root)?;
        db::save_panel(&conn, panel)
    }

    fn load_panel(&self) -> Result<Option<PanelState>> {
        let conn = db::open_db(&self.project_root)?;
        db::load_panel(&conn)
    }

    fn clear_panel(&self) -> Result<()> {
        let conn = db::open_db(&self.project_root)?;
        db::clear_panel(&conn)
    }

    fn save_filters(&self, filters: &FilterState) -> Result<()> {
        let conn = db::open_db(&self.project_root)?;
        db::save_filters(&conn, filters)
    }

    fn load_filters(&self) -> Result<Option<FilterState>> {
        let conn = db::open_db(&self.project_root)?;
        db::load_filters(&conn)
    }
}

/// In-memory port for tests and headless embedding.
#[derive(Default)]
pub struct MemoryUiState {
    panel: Mutex<Option<PanelState>>,
    filters: Mutex<Option<FilterState>>,
}

impl MemoryUiState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UiStatePort for MemoryUiState {
    fn save_panel(&self, panel: &PanelState) -> Result<()> {
        *self.panel.lock().unwrap() = Some(panel.clone());
        Ok(())
    }

    fn load_panel(&self) -> Result<Option<PanelState>> {
        Ok(self.panel.lock().unwrap().clone())
    }

    fn clear_panel(&self) -> Result<()> {
        *self.panel.lock().unwrap() = None;
        Ok(())
    }

    fn save_filters(&self, filters: &FilterState) -> Result<()> {
        *self.filters.lock().unwrap() = Some(filters.clone());
        Ok(())
    }

    fn load_filters(&self) -> Result<Option<FilterState>> {
        Ok(self.filters.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::Task;

    #[test]
    fn test_sqlite_port_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let port = SqliteUiState::new(dir.path());

        assert_eq!(port.load_panel().unwrap(), None);

        let panel = PanelState {
            selected: Some(Task::draft(1, "pick me", "not-started", 1.0)),
            is_open: true,
        };
        port.save_panel(&panel).unwrap();
        assert_eq!(port.load_panel().unwrap(), Some(panel));

        port.clear_panel().unwrap();
        assert_eq!(port.load_panel().unwrap(), None);

        let filters = FilterState::default().with_search("q");
        port.save_filters(&filters).unwrap();
        assert_eq!(port.load_filters().unwrap(), Some(filters));
    }

    #[test]
    fn test_memory_port_round_trip() {
        let port = MemoryUiState::new();
        let panel = PanelState::default();
        port.save_panel(&panel).unwrap();
        assert_eq!(port.load_panel().unwrap(), Some(panel));
        port.clear_panel().unwrap();
        assert_eq!(port.load_panel().unwrap(), None);
    }
}
