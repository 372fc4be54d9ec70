//! # Generic Clients
//!
//! `ResourceClient<T>` forwards per-kind requests to a service task; `CatalogClient` does the
//! same for the catalog-wide calls. Both hold only a sender, so cloning is cheap and clones can
//! be handed to every view.

use crate::framework::{
    CatalogRequest, GatewayError, ListQuery, PhotoUpload, Record, RecordDraft, RecordId,
    ResourceRequest,
};
use crate::model::{SearchResults, Suggestions};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Whether a save creates a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    New,
    Existing(RecordId),
}

/// What happened to the optional photo during a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoStatus {
    /// No photo was supplied.
    Skipped,
    /// Stored under this server-relative path.
    Uploaded(String),
    /// The record was saved but the upload failed. Nothing is rolled back.
    Failed(String),
}

/// Result of the two-phase save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: RecordId,
    pub photo: PhotoStatus,
}

/// A type-safe client for one record kind.
pub struct ResourceClient<T: Record> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Record> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, GatewayError>>) -> ResourceRequest<T>,
    ) -> Result<R, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| GatewayError::ServiceClosed)?;
        response.await.map_err(|_| GatewayError::ServiceDropped)?
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<T>, GatewayError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    pub async fn get(&self, id: RecordId) -> Result<Option<T>, GatewayError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Creates a record. A blank name is rejected before the request is sent.
    pub async fn create(&self, draft: T::Draft) -> Result<RecordId, GatewayError> {
        draft.validate()?;
        self.request(|respond_to| ResourceRequest::Create { draft, respond_to })
            .await
    }

    pub async fn update(&self, id: RecordId, draft: T::Draft) -> Result<T, GatewayError> {
        draft.validate()?;
        self.request(|respond_to| ResourceRequest::Update {
            id,
            draft,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), GatewayError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Uploads a photo for an existing record and returns its stored path.
    pub async fn upload_photo(
        &self,
        id: RecordId,
        photo: PhotoUpload,
    ) -> Result<String, GatewayError> {
        self.request(|respond_to| ResourceRequest::UploadPhoto {
            id,
            photo,
            respond_to,
        })
        .await
    }

    /// Create-or-update, then upload the photo if one was given.
    ///
    /// The upload is only issued once the first phase produced an identifier. An upload
    /// failure is reported in the outcome and leaves the saved record in place.
    #[instrument(skip(self, draft, photo), fields(kind = %T::KIND))]
    pub async fn save(
        &self,
        target: SaveTarget,
        draft: T::Draft,
        photo: Option<PhotoUpload>,
    ) -> Result<SaveOutcome, GatewayError> {
        debug!(?target, ?draft, has_photo = photo.is_some(), "save called");
        let id = match target {
            SaveTarget::New => self.create(draft).await?,
            SaveTarget::Existing(id) => self.update(id, draft).await?.id().clone(),
        };

        let photo = match photo {
            None => PhotoStatus::Skipped,
            Some(photo) => match self.upload_photo(id.clone(), photo).await {
                Ok(path) => PhotoStatus::Uploaded(path),
                Err(e) => {
                    warn!(%id, error = %e, "Photo upload failed after save");
                    PhotoStatus::Failed(e.to_string())
                }
            },
        };
        info!(%id, ?photo, "Saved");
        Ok(SaveOutcome { id, photo })
    }
}

/// Client for the catalog-wide endpoints.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, GatewayError>>) -> CatalogRequest,
    ) -> Result<R, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| GatewayError::ServiceClosed)?;
        response.await.map_err(|_| GatewayError::ServiceDropped)?
    }

    #[instrument(skip(self))]
    pub async fn genres(&self) -> Result<Vec<String>, GatewayError> {
        self.request(|respond_to| CatalogRequest::Genres { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn nationalities(&self) -> Result<Vec<String>, GatewayError> {
        self.request(|respond_to| CatalogRequest::Nationalities { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: String) -> Result<SearchResults, GatewayError> {
        self.request(|respond_to| CatalogRequest::Search { query, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn suggestions(&self) -> Result<Suggestions, GatewayError> {
        self.request(|respond_to| CatalogRequest::Suggestions { respond_to })
            .await
    }
}
