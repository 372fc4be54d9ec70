//! # Gateway Messages
//!
//! Request types sent from clients to service tasks, and the payload types they carry.

use crate::framework::{GatewayError, Record, RecordId};
use crate::model::{SearchResults, Suggestions};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by services.
pub type Response<T> = oneshot::Sender<Result<T, GatewayError>>;

/// Active list constraints plus an optional result cap.
///
/// Only non-empty filter values ever reach a `ListQuery`; see [`crate::filter::FilterSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub params: Vec<(String, String)>,
    pub limit: Option<usize>,
}

impl ListQuery {
    /// The unfiltered collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// The `limit` most recent records.
    pub fn recent(limit: usize) -> Self {
        Self {
            params: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Query-string pairs, `limit` last.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.clone();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// A single image file destined for a record's photo slot.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// A JPEG produced by the cropper.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "cropped-image.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes,
        }
    }
}

impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Per-kind operations, mirroring the collaborator's REST routes.
#[derive(Debug)]
pub enum ResourceRequest<T: Record> {
    List {
        query: ListQuery,
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: RecordId,
        respond_to: Response<Option<T>>,
    },
    Create {
        draft: T::Draft,
        respond_to: Response<RecordId>,
    },
    Update {
        id: RecordId,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Delete {
        id: RecordId,
        respond_to: Response<()>,
    },
    UploadPhoto {
        id: RecordId,
        photo: PhotoUpload,
        respond_to: Response<String>,
    },
}

/// Catalog-wide operations that span both record kinds.
#[derive(Debug)]
pub enum CatalogRequest {
    Genres { respond_to: Response<Vec<String>> },
    Nationalities { respond_to: Response<Vec<String>> },
    Search {
        query: String,
        respond_to: Response<SearchResults>,
    },
    Suggestions { respond_to: Response<Suggestions> },
}
