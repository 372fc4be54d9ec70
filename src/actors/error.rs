//! Error types for actor operations.

use crate::framework::{GatewayError, ValidationError};
use thiserror::Error;

/// Errors that can occur during actor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActorError {
    /// The requested actor was not found.
    #[error("Actor not found: {0}")]
    NotFound(String),

    /// The actor data was rejected before it was sent.
    #[error("Actor validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The collaborator answered with an error status.
    #[error("Actor rejected by backend ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// An error occurred while reaching the collaborator.
    #[error("Gateway communication error: {0}")]
    Communication(String),
}

impl From<GatewayError> for ActorError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(id) => ActorError::NotFound(id),
            GatewayError::Validation(v) => ActorError::Validation(v),
            GatewayError::Status { status, body } => ActorError::Rejected { status, body },
            other => ActorError::Communication(other.to_string()),
        }
    }
}
