//! # Record Trait
//!
//! The `Record` trait is the contract every catalog entry (Actor, Movie) implements so the
//! generic machinery can manage it: the REST endpoint it lives under, the fields its editor
//! shows, how form input becomes a draft, and how a collaborator applies drafts and filters.
//!
//! # Architecture Note
//! Actors and movies only differ by their fields. Rather than writing two clients, two list
//! views and two forms, the kind-specific pieces are collected here and everything else is
//! written once over `T: Record`.

use crate::form::{FieldSpec, FormValues};
use crate::framework::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug, Display};

/// Opaque identifier assigned by the collaborator.
pub type RecordId = String;

/// The two entity types managed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Actor,
    Movie,
}

impl RecordKind {
    /// Collection segment under `/api`.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Actor => "actors",
            RecordKind::Movie => "movies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Actor => "actor",
            RecordKind::Movie => "movie",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Create/update payload for a record kind.
///
/// Updates reuse the create payload: the collaborator replaces every field it is given.
pub trait RecordDraft: Serialize + Clone + Debug + Send + Sync + 'static {
    /// The required display name.
    fn name(&self) -> &str;

    /// Client-side checks run before any request is issued.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name().trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(())
    }
}

/// Trait that any catalog entry must implement to be served by the gateway.
pub trait Record: Clone + Debug + PartialEq + DeserializeOwned + Send + Sync + 'static {
    /// Payload for create and update.
    type Draft: RecordDraft;

    /// Which endpoint family this record lives under.
    const KIND: RecordKind;

    /// Filter fields the list view exposes, in display order.
    const FILTER_FIELDS: &'static [&'static str];

    /// Field schema driving the generic editor.
    fn schema() -> &'static [FieldSpec];

    fn id(&self) -> &RecordId;

    fn name(&self) -> &str;

    /// Server-relative photo path, if one was uploaded.
    fn photo_path(&self) -> Option<&str>;

    // --- Form binding ---

    /// Build a draft from raw form values. Integer fields are coerced here.
    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError>;

    /// Current field values, used to prefill the editor.
    fn form_values(&self) -> FormValues;

    // --- Collaborator hooks ---

    /// Construct the stored record from an assigned id and a draft.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Replace every draft-controlled field.
    fn apply_draft(&mut self, draft: Self::Draft);

    fn set_photo_path(&mut self, path: String);

    /// Whether this record satisfies one active filter constraint.
    /// Unknown fields do not constrain.
    fn matches_filter(&self, field: &str, value: &str) -> bool;
}

/// Case-insensitive substring match used by text filters.
pub(crate) fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(text) => text.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}
