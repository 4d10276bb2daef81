//! Open the local DB with WAL and migrations.

use anyhow::{Context, Result};
use std::path::Path;

use super::migrations;

pub const TASKDECK_DB: &str = "taskdeck.db";

/// Opens the DB inside a given taskdeck dir (e.g. ~/.taskdeck or
/// project_root/.taskdeck). Creates the dir if needed, enables WAL, runs
/// migrations.
pub fn open_db_at(taskdeck_dir: &Path) -> Result<rusqlite::Connection> {
    std::fs::create_dir_all(taskdeck_dir).context("create .taskdeck dir")?;
    let db_path = taskdeck_dir.join(TASKDECK_DB);
    let conn = rusqlite::Connection::open(&db_path).context("open taskdeck.db")?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
    migrations::run_all(&conn)?;
    Ok(conn)
}

/// Opens the project-local DB (creates `.taskdeck/` if needed).
pub fn open_db(project_root: &Path) -> Result<rusqlite::Connection> {
    open_db_at(&project_root.join(".taskdeck"))
}
