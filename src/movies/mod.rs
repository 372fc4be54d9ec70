//! Movie-specific record logic and service factories.

pub mod error;
pub mod record;

pub use error::*;

use crate::clients::MoviesClient;
use crate::framework::{HttpBackend, HttpResourceService, MemoryResourceService};
use crate::model::Movie;
use std::sync::Arc;

/// Creates a movie service backed by the REST collaborator, and its client.
pub fn new_http(backend: Arc<HttpBackend>) -> (HttpResourceService<Movie>, MoviesClient) {
    let (service, generic_client) = HttpResourceService::new(32, backend);
    (service, MoviesClient::new(generic_client))
}

/// Creates an in-memory movie service and its client.
pub fn new_memory() -> (MemoryResourceService<Movie>, MoviesClient) {
    let (service, generic_client) = MemoryResourceService::new(32);
    (service, MoviesClient::new(generic_client))
}
