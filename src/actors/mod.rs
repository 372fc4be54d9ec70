//! Actor-specific record logic and service factories.

pub mod error;
pub mod record;

pub use error::*;

use crate::clients::ActorsClient;
use crate::framework::{HttpBackend, HttpResourceService, MemoryResourceService};
use crate::model::Actor;
use std::sync::Arc;

/// Creates an actor service backed by the REST collaborator, and its client.
pub fn new_http(backend: Arc<HttpBackend>) -> (HttpResourceService<Actor>, ActorsClient) {
    let (service, generic_client) = HttpResourceService::new(32, backend);
    (service, ActorsClient::new(generic_client))
}

/// Creates an in-memory actor service and its client.
pub fn new_memory() -> (MemoryResourceService<Actor>, ActorsClient) {
    let (service, generic_client) = MemoryResourceService::new(32);
    (service, ActorsClient::new(generic_client))
}
