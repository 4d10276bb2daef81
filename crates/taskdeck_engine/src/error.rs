//! Engine error types.
//!
//! Validation rejections happen before any optimistic mutation, so they
//! never need a rollback. Remote failures arrive after one and do.

use taskdeck_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before any mutation was applied.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote boundary failed after an optimistic apply; the engine has
    /// already rolled the mutation back when this surfaces.
    #[error("remote error: {0}")]
    Remote(#[from] ApiError),

    #[error("section {0} is not loaded")]
    SectionNotFound(u64),

    #[error("task {0} is not loaded")]
    TaskNotFound(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = EngineError::Validation("task name is empty".into());
        assert_eq!(err.to_string(), "validation error: task name is empty");
    }

    #[test]
    fn test_remote_wraps_api_error() {
        let err = EngineError::from(ApiError::NotFound);
        assert!(matches!(err, EngineError::Remote(ApiError::NotFound)));
    }
}
