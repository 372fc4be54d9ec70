//! [`Record`] implementation for [`Movie`].

use crate::form::{FieldSpec, FormValues};
use crate::framework::record::contains_ci;
use crate::framework::{Record, RecordId, RecordKind, ValidationError};
use crate::model::{Movie, MovieDraft};

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::text("nom", "Titre").required(),
    FieldSpec::integer("annee", "Année", false),
    FieldSpec::text("genre", "Genre"),
    FieldSpec::long_text("description", "Description"),
    FieldSpec::url("lien_externe", "Lien externe"),
];

impl Record for Movie {
    type Draft = MovieDraft;

    const KIND: RecordKind = RecordKind::Movie;

    const FILTER_FIELDS: &'static [&'static str] = &["search", "nom", "genre", "annee"];

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
        self.cover_photo.as_deref()
    }

    fn draft_from_form(values: &FormValues) -> Result<MovieDraft, ValidationError> {
        let year = match values.integer("annee")? {
            None => None,
            Some(year) => Some(i32::try_from(year).map_err(|_| {
                ValidationError::InvalidInteger {
                    field: "annee".to_string(),
                    value: year.to_string(),
                }
            })?),
        };
        Ok(MovieDraft {
            name: values.required_text("nom")?,
            year,
            genre: values.text("genre"),
            description: values.text("description"),
            external_link: values.url("lien_externe")?,
        })
    }

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set("nom", self.name.as_str());
        values.set_opt("annee", self.year);
        values.set_opt("genre", self.genre.as_deref());
        values.set_opt("description", self.description.as_deref());
        values.set_opt("lien_externe", self.external_link.as_deref());
        values
    }

    fn from_draft(id: RecordId, draft: MovieDraft) -> Self {
        let mut movie = Movie::new(id, "");
        movie.apply_draft(draft);
        movie
    }

    fn apply_draft(&mut self, draft: MovieDraft) {
        self.name = draft.name;
        self.year = draft.year;
        self.genre = draft.genre;
        self.description = draft.description;
        self.external_link = draft.external_link;
    }

    fn set_photo_path(&mut self, path: String) {
        self.cover_photo = Some(path);
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "search" => {
                contains_ci(Some(&self.name), value)
                    || contains_ci(self.genre.as_deref(), value)
                    || contains_ci(self.description.as_deref(), value)
            }
            "nom" => contains_ci(Some(&self.name), value),
            "genre" => contains_ci(self.genre.as_deref(), value),
            "annee" => match (self.year, value.trim().parse::<i32>()) {
                (Some(year), Ok(wanted)) => year == wanted,
                _ => false,
            },
            _ => true,
        }
    }
}
