//! taskdeck-engine — client-side optimistic state synchronization.
//!
//! Keeps a local, UI-facing copy of server-owned sections and tasks
//! consistent under optimistic mutations, paginated partial loads,
//! drag-and-drop reordering, and filter-driven refetches.
//!
//! Every mutation intent follows the same pipeline: snapshot the touched
//! entities, apply the change synchronously, call the remote boundary, then
//! merge the confirmed result or restore the snapshot verbatim. The engine
//! suspends only at the remote call; optimistic writes are visible before
//! the first await.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod paging;
pub mod persist;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use dispatch::DispatchOutcome;
pub use engine::{BulkOutcome, Engine, UpdateOutcome};
pub use error::{EngineError, Result};
pub use paging::MergeMode;
pub use persist::{MemoryUiState, SqliteUiState, UiStatePort};
pub use store::Board;
