//! [`Record`] implementation for [`Actor`].

use crate::form::{FieldSpec, FormValues};
use crate::framework::record::contains_ci;
use crate::framework::{Record, RecordId, RecordKind, ValidationError};
use crate::model::{Actor, ActorDraft};

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::text("nom", "Nom").required(),
    FieldSpec::integer("age", "Âge", true),
    FieldSpec::text("nationalite", "Nationalité"),
    FieldSpec::long_text("biographie", "Biographie"),
];

impl Record for Actor {
    type Draft = ActorDraft;

    const KIND: RecordKind = RecordKind::Actor;

    const FILTER_FIELDS: &'static [&'static str] =
        &["search", "nom", "nationalite", "age_min", "age_max"];

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn photo_path(&self) -> Option<&str> {
        self.profile_photo.as_deref()
    }

    fn draft_from_form(values: &FormValues) -> Result<ActorDraft, ValidationError> {
        Ok(ActorDraft {
            name: values.required_text("nom")?,
            age: values.non_negative("age")?,
            nationality: values.text("nationalite"),
            biography: values.text("biographie"),
        })
    }

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set("nom", self.name.as_str());
        values.set_opt("age", self.age);
        values.set_opt("nationalite", self.nationality.as_deref());
        values.set_opt("biographie", self.biography.as_deref());
        values
    }

    fn from_draft(id: RecordId, draft: ActorDraft) -> Self {
        let mut actor = Actor::new(id, "");
        actor.apply_draft(draft);
        actor
    }

    /// Replaces every draft field. The photo is only changed by an upload.
    fn apply_draft(&mut self, draft: ActorDraft) {
        self.name = draft.name;
        self.age = draft.age;
        self.nationality = draft.nationality;
        self.biography = draft.biography;
    }

    fn set_photo_path(&mut self, path: String) {
        self.profile_photo = Some(path);
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "search" => {
                contains_ci(Some(&self.name), value)
                    || contains_ci(self.nationality.as_deref(), value)
                    || contains_ci(self.biography.as_deref(), value)
            }
            "nom" => contains_ci(Some(&self.name), value),
            "nationalite" => contains_ci(self.nationality.as_deref(), value),
            "age_min" => match (self.age, value.trim().parse::<u32>()) {
                (Some(age), Ok(min)) => age >= min,
                _ => false,
            },
            "age_max" => match (self.age, value.trim().parse::<u32>()) {
                (Some(age), Ok(max)) => age <= max,
                _ => false,
            },
            _ => true,
        }
    }
}
