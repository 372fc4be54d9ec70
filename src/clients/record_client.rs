use crate::framework::{
    GatewayError, ListQuery, PhotoUpload, Record, RecordId, ResourceClient, SaveOutcome,
    SaveTarget,
};
use async_trait::async_trait;

/// Trait for kind-specific clients to inherit the standard record operations.
///
/// Implementors only provide access to the inner [`ResourceClient`]; every operation maps
/// [`GatewayError`] into the kind's own error type.
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The kind-specific error type.
    type Error: From<GatewayError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    #[tracing::instrument(skip(self))]
    async fn list(&self, query: ListQuery) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::Error::from)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: RecordId) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::Error::from)
    }

    /// Deletes a record. Callers are responsible for confirming first.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::Error::from)
    }

    /// Create-or-update followed by the optional photo upload.
    #[tracing::instrument(skip(self, draft, photo))]
    async fn save(
        &self,
        target: SaveTarget,
        draft: T::Draft,
        photo: Option<PhotoUpload>,
    ) -> Result<SaveOutcome, Self::Error> {
        self.inner()
            .save(target, draft, photo)
            .await
            .map_err(Self::Error::from)
    }
}
