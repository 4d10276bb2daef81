use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A value failed domain validation (unknown vocabulary entry, bad
    /// enum literal, and the like).
    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
