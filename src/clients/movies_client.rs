use crate::clients::RecordClient;
use crate::framework::{PhotoUpload, RecordId, ResourceClient};
use crate::model::{Movie, MovieDraft};
use crate::movies::MovieError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the movie collection.
#[derive(Clone)]
pub struct MoviesClient {
    inner: ResourceClient<Movie>,
}

impl MoviesClient {
    pub fn new(inner: ResourceClient<Movie>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Movie> for MoviesClient {
    type Error = MovieError;

    fn inner(&self) -> &ResourceClient<Movie> {
        &self.inner
    }
}

impl MoviesClient {
    #[instrument(skip(self))]
    pub async fn create_movie(&self, draft: MovieDraft) -> Result<RecordId, MovieError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_movie(&self, id: RecordId, draft: MovieDraft) -> Result<Movie, MovieError> {
        debug!("Sending request");
        Ok(self.inner.update(id, draft).await?)
    }

    /// Stores a new cover and returns its server-relative path.
    #[instrument(skip(self, photo))]
    pub async fn upload_cover(
        &self,
        id: RecordId,
        photo: PhotoUpload,
    ) -> Result<String, MovieError> {
        debug!(?photo, "Sending request");
        Ok(self.inner.upload_photo(id, photo).await?)
    }
}
