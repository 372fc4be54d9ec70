//! Error types for movie operations.

use crate::framework::{GatewayError, ValidationError};
use thiserror::Error;

/// Errors that can occur during movie operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Movie validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Movie rejected by backend ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Gateway communication error: {0}")]
    Communication(String),
}

impl From<GatewayError> for MovieError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(id) => MovieError::NotFound(id),
            GatewayError::Validation(v) => MovieError::Validation(v),
            GatewayError::Status { status, body } => MovieError::Rejected { status, body },
            other => MovieError::Communication(other.to_string()),
        }
    }
}
