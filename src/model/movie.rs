use crate::framework::{RecordDraft, RecordId};
use serde::{Deserialize, Serialize};

/// A film in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: RecordId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "annee", default)]
    pub year: Option<i32>,
    /// Free text; the genre list is only a hint.
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "lien_externe", default)]
    pub external_link: Option<String>,
    /// Server-relative path, set by a photo upload.
    #[serde(rename = "photo_couverture", default)]
    pub cover_photo: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: None,
            genre: None,
            description: None,
            external_link: None,
            cover_photo: None,
        }
    }
}

/// Payload for creating or replacing a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "annee")]
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "lien_externe")]
    pub external_link: Option<String>,
}

impl MovieDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            year: None,
            genre: None,
            description: None,
            external_link: None,
        }
    }
}

impl RecordDraft for MovieDraft {
    fn name(&self) -> &str {
        &self.name
    }
}
