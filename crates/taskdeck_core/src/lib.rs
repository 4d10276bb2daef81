//! taskdeck-core — shared types: tasks, sections, filters, events (no engine/HTTP deps).

pub mod db;
pub mod error;
pub mod event;
pub mod filter;
pub mod order;
pub mod section;
pub mod task;

pub use error::{CoreError, Result};
pub use event::EngineEvent;
pub use filter::FilterState;
pub use order::{interpolate, neighbor_orders, INITIAL_ORDER};
pub use section::{default_status_options, PageCursor, Section, StatusOption};
pub use task::{Attachment, Priority, Task, TaskId};
