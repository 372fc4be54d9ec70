//! REST client for the catalog collaborator.
//!
//! Wraps the collaborator's `/api` routes (record CRUD, photo upload, genres,
//! nationalities, search, suggestions) using [`reqwest`]. Service tasks own an
//! `Arc<HttpBackend>` and call into it once per request.

use crate::framework::{GatewayError, ListQuery, PhotoUpload, Record, RecordId, RecordKind};
use crate::model::{SearchResults, Suggestions};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// HTTP client for a single collaborator instance.
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: Url,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: RecordId,
}

#[derive(Debug, Deserialize)]
struct PhotoStored {
    photo_url: String,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NationalityList {
    #[serde(default)]
    nationalities: Vec<String>,
}

impl HttpBackend {
    /// Create a backend for the collaborator at `base_url` (e.g. `http://host:8001`).
    /// Routes are resolved under `{base_url}/api/`.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Result<Self, GatewayError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            api_url: base.join("api/")?,
        })
    }

    /// Absolute URL for the given path segments under `/api`. Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn list<T: Record>(&self, query: &ListQuery) -> Result<Vec<T>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&[T::KIND.collection()])?)
            .query(&query.to_pairs())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&[T::KIND.collection(), id])?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_response(response).await.map(Some)
    }

    pub async fn create<T: Record>(&self, draft: &T::Draft) -> Result<RecordId, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(&[T::KIND.collection()])?)
            .json(draft)
            .send()
            .await?;
        let created: Created = Self::parse_response(response).await?;
        Ok(created.id)
    }

    pub async fn update<T: Record>(&self, id: &str, draft: &T::Draft) -> Result<T, GatewayError> {
        let response = self
            .client
            .put(self.endpoint(&[T::KIND.collection(), id])?)
            .json(draft)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Self::parse_response(response).await
    }

    pub async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.endpoint(&[kind.collection(), id])?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Self::ensure_success(response).await.map(|_| ())
    }

    /// Sends a `POST /{kind}/{id}/photo` multipart request with a single `file` field.
    pub async fn upload_photo(
        &self,
        kind: RecordKind,
        id: &str,
        photo: PhotoUpload,
    ) -> Result<String, GatewayError> {
        let part = reqwest::multipart::Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.endpoint(&[kind.collection(), id, "photo"])?)
            .multipart(form)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        let stored: PhotoStored = Self::parse_response(response).await?;
        Ok(stored.photo_url)
    }

    pub async fn genres(&self) -> Result<Vec<String>, GatewayError> {
        let response = self.client.get(self.endpoint(&["genres"])?).send().await?;
        let list: GenreList = Self::parse_response(response).await?;
        Ok(list.genres)
    }

    pub async fn nationalities(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&["nationalities"])?)
            .send()
            .await?;
        let list: NationalityList = Self::parse_response(response).await?;
        Ok(list.nationalities)
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&["search"])?)
            .query(&[("q", query)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn suggestions(&self) -> Result<Suggestions, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&["suggestions"])?)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Returns the response unchanged on success, or a [`GatewayError::Status`] with the
    /// status code and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<R>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        let url = Url::parse(base).unwrap();
        HttpBackend::with_client(reqwest::Client::new(), &url).unwrap()
    }

    #[test]
    fn endpoint_is_rooted_under_api() {
        let backend = backend("http://localhost:8001");
        let url = backend.endpoint(&["actors"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api/actors");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let backend = backend("https://example.com/cinebase");
        let url = backend.endpoint(&["movies", "m1", "photo"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/cinebase/api/movies/m1/photo");
    }

    #[test]
    fn endpoint_encodes_identifiers() {
        let backend = backend("http://localhost:8001/");
        let url = backend.endpoint(&["actors", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api/actors/a%2Fb%20c");
    }
}
