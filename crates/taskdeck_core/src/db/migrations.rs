//! SQL schema for the local DB. Applied on open.

/// UI state key-value store (panel record, last-applied filters).
pub const UI_STATE: &str = "
CREATE TABLE IF NOT EXISTS ui_state (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Run all migrations on an open connection.
pub fn run_all(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    conn.execute_batch(UI_STATE)?;
    Ok(())
}
