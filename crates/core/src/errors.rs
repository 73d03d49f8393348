use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    #[error("{0}")]
    NotConnected(String),

    #[error("Unprocessable input: {0}")]
    Unprocessable(String),

    #[error("Upstream provider error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CalError {
    /// The client-facing message without the variant prefix. Database and
    /// internal failures never expose their cause.
    pub fn message(&self) -> String {
        match self {
            CalError::NotFound(message)
            | CalError::Validation(message)
            | CalError::Unauthenticated(message)
            | CalError::NotConnected(message)
            | CalError::Unprocessable(message)
            | CalError::Upstream(message) => message.clone(),
            CalError::Database(_) | CalError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

pub type CalResult<T> = Result<T, CalError>;
