//! # Gateway Errors
//!
//! Common error types shared by every record kind. Per-kind clients wrap
//! [`GatewayError`] into their own enums (see [`crate::actors::ActorError`]).

use thiserror::Error;

/// Input rejected before any request leaves the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The required name field is empty or whitespace-only.
    #[error("name is required")]
    MissingName,

    /// An integer field could not be parsed.
    #[error("field `{field}` expects an integer, got {value:?}")]
    InvalidInteger { field: String, value: String },

    /// A non-negative integer field received a negative value.
    #[error("field `{field}` must not be negative")]
    Negative { field: String },

    /// A URL field could not be parsed.
    #[error("field `{field}` expects an http(s) URL, got {value:?}")]
    InvalidUrl { field: String, value: String },
}

/// Errors raised while talking to the collaborator through a service task.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Service closed")]
    ServiceClosed,

    #[error("Service dropped response channel")]
    ServiceDropped,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl GatewayError {
    /// True when the collaborator answered with a "not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
            || matches!(self, GatewayError::Status { status: 404, .. })
    }
}
