//! # HTTP Services
//!
//! The "server" half of the gateway: a task that owns the request receiver and answers each
//! request by calling the collaborator through [`HttpBackend`].
//!
//! Unlike the in-memory service, which owns its store and therefore answers sequentially, an
//! HTTP service holds no state of its own. Each request is handed to its own task so a slow list
//! never holds up a search or an upload issued after it; completions arrive in whatever order
//! the collaborator answers.

use crate::framework::{
    CatalogClient, CatalogRequest, HttpBackend, Record, ResourceClient, ResourceRequest,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Answers [`ResourceRequest`]s for one record kind over HTTP.
pub struct HttpResourceService<T: Record> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    backend: Arc<HttpBackend>,
}

impl<T: Record> HttpResourceService<T> {
    /// Creates the service and its client. `buffer_size` bounds queued requests.
    pub fn new(buffer_size: usize, backend: Arc<HttpBackend>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, backend }, ResourceClient::new(sender))
    }

    /// Runs until every client has been dropped.
    pub async fn run(mut self) {
        let kind = T::KIND;
        info!(%kind, "Service started");

        while let Some(msg) = self.receiver.recv().await {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                match msg {
                    ResourceRequest::List { query, respond_to } => {
                        debug!(%kind, ?query, "List");
                        let result = backend.list::<T>(&query).await;
                        match &result {
                            Ok(records) => debug!(%kind, count = records.len(), "Listed"),
                            Err(e) => warn!(%kind, error = %e, "List failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                    ResourceRequest::Get { id, respond_to } => {
                        let result = backend.get::<T>(&id).await;
                        debug!(%kind, %id, found = matches!(result, Ok(Some(_))), "Get");
                        let _ = respond_to.send(result);
                    }
                    ResourceRequest::Create { draft, respond_to } => {
                        debug!(%kind, ?draft, "Create");
                        let result = backend.create::<T>(&draft).await;
                        match &result {
                            Ok(id) => info!(%kind, %id, "Created"),
                            Err(e) => warn!(%kind, error = %e, "Create failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                    ResourceRequest::Update {
                        id,
                        draft,
                        respond_to,
                    } => {
                        debug!(%kind, %id, ?draft, "Update");
                        let result = backend.update::<T>(&id, &draft).await;
                        match &result {
                            Ok(_) => info!(%kind, %id, "Updated"),
                            Err(e) => warn!(%kind, %id, error = %e, "Update failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                    ResourceRequest::Delete { id, respond_to } => {
                        debug!(%kind, %id, "Delete");
                        let result = backend.delete(kind, &id).await;
                        match &result {
                            Ok(()) => info!(%kind, %id, "Deleted"),
                            Err(e) => warn!(%kind, %id, error = %e, "Delete failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                    ResourceRequest::UploadPhoto {
                        id,
                        photo,
                        respond_to,
                    } => {
                        debug!(%kind, %id, ?photo, "UploadPhoto");
                        let result = backend.upload_photo(kind, &id, photo).await;
                        match &result {
                            Ok(path) => info!(%kind, %id, %path, "Photo stored"),
                            Err(e) => warn!(%kind, %id, error = %e, "Photo upload failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                }
            });
        }

        info!(%kind, "Shutdown");
    }
}

/// Answers [`CatalogRequest`]s over HTTP.
pub struct HttpCatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    backend: Arc<HttpBackend>,
}

impl HttpCatalogService {
    pub fn new(buffer_size: usize, backend: Arc<HttpBackend>) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, backend }, CatalogClient::new(sender))
    }

    pub async fn run(mut self) {
        info!("Catalog service started");

        while let Some(msg) = self.receiver.recv().await {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                match msg {
                    CatalogRequest::Genres { respond_to } => {
                        let result = backend.genres().await;
                        if let Err(e) = &result {
                            warn!(error = %e, "Genres failed");
                        }
                        let _ = respond_to.send(result);
                    }
                    CatalogRequest::Nationalities { respond_to } => {
                        let result = backend.nationalities().await;
                        if let Err(e) = &result {
                            warn!(error = %e, "Nationalities failed");
                        }
                        let _ = respond_to.send(result);
                    }
                    CatalogRequest::Search { query, respond_to } => {
                        debug!(%query, "Search");
                        let result = backend.search(&query).await;
                        match &result {
                            Ok(found) => debug!(
                                actors = found.actors.len(),
                                movies = found.movies.len(),
                                "Search done"
                            ),
                            Err(e) => warn!(error = %e, "Search failed"),
                        }
                        let _ = respond_to.send(result);
                    }
                    CatalogRequest::Suggestions { respond_to } => {
                        let result = backend.suggestions().await;
                        if let Err(e) = &result {
                            warn!(error = %e, "Suggestions failed");
                        }
                        let _ = respond_to.send(result);
                    }
                }
            });
        }

        info!("Catalog service shutdown");
    }
}
