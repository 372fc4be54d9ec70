use crate::framework::{GatewayError, ValidationError};
use thiserror::Error;

/// Errors surfaced by view operations.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A mutation was attempted while admin mode is off.
    #[error("catalog is read-only")]
    ReadOnly,

    /// The user declined the confirmation prompt.
    #[error("operation cancelled")]
    Declined,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
