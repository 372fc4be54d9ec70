use crate::actors::ActorError;
use crate::clients::RecordClient;
use crate::framework::{PhotoUpload, RecordId, ResourceClient};
use crate::model::{Actor, ActorDraft};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the actor collection.
#[derive(Clone)]
pub struct ActorsClient {
    inner: ResourceClient<Actor>,
}

impl ActorsClient {
    pub fn new(inner: ResourceClient<Actor>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Actor> for ActorsClient {
    type Error = ActorError;

    fn inner(&self) -> &ResourceClient<Actor> {
        &self.inner
    }
}

impl ActorsClient {
    #[instrument(skip(self))]
    pub async fn create_actor(&self, draft: ActorDraft) -> Result<RecordId, ActorError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_actor(&self, id: RecordId, draft: ActorDraft) -> Result<Actor, ActorError> {
        debug!("Sending request");
        Ok(self.inner.update(id, draft).await?)
    }

    /// Stores a new profile photo and returns its server-relative path.
    #[instrument(skip(self, photo))]
    pub async fn upload_profile_photo(
        &self,
        id: RecordId,
        photo: PhotoUpload,
    ) -> Result<String, ActorError> {
        debug!(?photo, "Sending request");
        Ok(self.inner.upload_photo(id, photo).await?)
    }
}
