use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error comes from a caller-side contract violation
    /// rather than a data-availability problem.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
