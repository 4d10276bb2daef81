//! Panel and filter persistence in the ui_state table.

use anyhow::Result;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::task::Task;

const PANEL_KEY: &str = "task_panel";
const FILTERS_KEY: &str = "filters";

/// The selected-task panel record, overwritten on every selection change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    pub selected: Option<Task>,
    pub is_open: bool,
}

fn get_value(conn: &rusqlite::Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM ui_state WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;
    Ok(rows.next()?.map(|row| row.get::<_, String>(0)).transpose()?)
}

fn set_value(conn: &rusqlite::Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO ui_state (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
        params![key, value],
    )?;
    Ok(())
}

pub fn save_panel(conn: &rusqlite::Connection, panel: &PanelState) -> Result<()> {
    set_value(conn, PANEL_KEY, &serde_json::to_string(panel)?)
}

pub fn load_panel(conn: &rusqlite::Connection) -> Result<Option<PanelState>> {
    match get_value(conn, PANEL_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Cleared on navigation away from the board.
pub fn clear_panel(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute("DELETE FROM ui_state WHERE key = ?1", params![PANEL_KEY])?;
    Ok(())
}

pub fn save_filters(conn: &rusqlite::Connection, filters: &FilterState) -> Result<()> {
    set_value(conn, FILTERS_KEY, &serde_json::to_string(filters)?)
}

pub fn load_filters(conn: &rusqlite::Connection) -> Result<Option<FilterState>> {
    match get_value(conn, FILTERS_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
