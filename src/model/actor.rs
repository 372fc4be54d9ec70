use crate::framework::{RecordDraft, RecordId};
use serde::{Deserialize, Serialize};

/// A performer in the catalog.
///
/// # Record
/// This struct implements [`Record`](crate::framework::Record) (see
/// [`crate::actors::record`]), which lets the generic clients, forms and views manage it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: RecordId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(rename = "nationalite", default)]
    pub nationality: Option<String>,
    #[serde(rename = "biographie", default)]
    pub biography: Option<String>,
    /// Server-relative path, set by a photo upload.
    #[serde(rename = "photo_profil", default)]
    pub profile_photo: Option<String>,
}

impl Actor {
    /// Creates an actor with only a name.
    ///
    /// # Notes
    /// The `id` is normally assigned by the collaborator.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            nationality: None,
            biography: None,
            profile_photo: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Payload for creating or replacing an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDraft {
    #[serde(rename = "nom")]
    pub name: String,
    pub age: Option<u32>,
    #[serde(rename = "nationalite")]
    pub nationality: Option<String>,
    #[serde(rename = "biographie")]
    pub biography: Option<String>,
}

impl ActorDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            nationality: None,
            biography: None,
        }
    }
}

impl RecordDraft for ActorDraft {
    fn name(&self) -> &str {
        &self.name
    }
}
