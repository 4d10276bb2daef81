use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("remote rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = ApiError::Rejected {
            status: 422,
            message: "name required".to_string(),
        };
        assert_eq!(err.to_string(), "remote rejected request (422): name required");
    }

    #[test]
    fn test_classification_helpers() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(ApiError::Conflict("stale".into()).is_conflict());
        assert!(!ApiError::NotFound.is_conflict());
    }
}
