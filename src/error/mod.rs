//! Error types for ggi.

use thiserror::Error;

use crate::auth::AuthError;

/// Primary error type for ggi operations.
#[derive(Error, Debug)]
pub enum GgiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GgiError {
    /// The wrapped authentication failure, if any.
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            Self::Auth(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for ggi operations.
pub type Result<T> = std::result::Result<T, GgiError>;
