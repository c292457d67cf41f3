use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid instance name: {0}")]
    InvalidInstance(String),

    #[error("invalid duration: {0} (expected between 1 and 36500 days)")]
    InvalidDuration(i64),
}

pub type ModelResult<T> = Result<T, ModelError>;
