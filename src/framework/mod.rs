//! Generic gateway machinery shared by every record kind.
//!
//! # Main Components
//!
//! - [`Record`] - Trait that catalog entries implement to be served by the gateway
//! - [`ResourceClient`] / [`CatalogClient`] - Cloneable handles that send requests to a service
//! - [`HttpResourceService`] / [`HttpCatalogService`] - Services answering over HTTP
//! - [`MemoryResourceService`] / [`MemoryCatalogService`] - In-memory collaborator
//! - [`GatewayError`] / [`ValidationError`] - Common error types
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test clients and views without a collaborator.

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;
pub mod record;
pub mod service;

pub use backend::HttpBackend;
pub use client::{CatalogClient, PhotoStatus, ResourceClient, SaveOutcome, SaveTarget};
pub use error::{GatewayError, ValidationError};
pub use memory::{MemoryCatalogService, MemoryResourceService};
pub use message::{CatalogRequest, ListQuery, PhotoUpload, ResourceRequest, Response};
pub use record::{Record, RecordDraft, RecordId, RecordKind};
pub use service::{HttpCatalogService, HttpResourceService};
