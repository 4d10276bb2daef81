//! Local SQLite state under `.taskdeck/` (WAL, migrations applied on open).
//!
//! Holds best-effort UI state only: the selected-task panel record and the
//! last-applied filter set. Nothing here participates in mutation
//! correctness; a lost write costs a restored panel, not data.

mod connection;
mod migrations;
mod ui_state;

pub use connection::{open_db, open_db_at, TASKDECK_DB};
pub use migrations::run_all as run_migrations;
pub use ui_state::{
    clear_panel, load_filters, load_panel, save_filters, save_panel, PanelState,
};
