//! taskdeck-api — the remote boundary the engine talks to.
//!
//! `ProjectRemote` is the abstract contract (HTTP/JSON assumed, routes an
//! implementation detail); `HttpRemote` is the reqwest-backed client. The
//! engine only ever sees `Arc<dyn ProjectRemote>`, so tests substitute a
//! scripted implementation.

pub mod boundary;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use boundary::ProjectRemote;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use http::HttpRemote;
pub use types::{
    InsertionNeighbors, SectionDeleteMode, SectionPage, SectionPatch, TaskPage, TaskPatch,
    TaskPayload,
};
