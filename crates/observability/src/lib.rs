//! TaskDeck Observability - tracing setup shared by the CLI and any embedder.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskdeck_observability::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new("taskdeck")
//!     .with_log_level("debug");
//!
//! taskdeck_observability::init(config).unwrap();
//!
//! // Or initialize from environment variables
//! // taskdeck_observability::init_from_env().unwrap();
//!
//! tracing::info!("engine started");
//! ```
//!
//! # Environment Variables
//!
//! - `TASKDECK_SERVICE_NAME` - Service name
//! - `TASKDECK_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env};
