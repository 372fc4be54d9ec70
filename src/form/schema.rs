//! # Field Schema
//!
//! Each record kind describes its editable fields once, as a static slice of [`FieldSpec`].
//! The generic [`RecordForm`](crate::form::RecordForm) and the validation below are driven
//! entirely by that description.

use crate::framework::ValidationError;
use std::collections::BTreeMap;
use url::Url;

/// How a field's raw string input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    LongText,
    /// Whole number, coerced when the draft is built.
    Integer { non_negative: bool },
    /// Absolute URL.
    Url,
}

/// One editable field of a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also the form key.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub const fn long_text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::LongText,
            required: false,
        }
    }

    pub const fn integer(name: &'static str, label: &'static str, non_negative: bool) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Integer { non_negative },
            required: false,
        }
    }

    pub const fn url(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Url,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Raw form input keyed by field name. Absent and blank fields read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Sets the field when a value is present, leaving it blank otherwise.
    pub fn set_opt<V: ToString>(&mut self, field: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(field, value.to_string());
        }
    }

    /// The raw value, or `""` when the field was never set.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed text, `None` when blank.
    pub fn text(&self, field: &str) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// The trimmed value of a required field; blank is an error.
    pub fn required_text(&self, field: &str) -> Result<String, ValidationError> {
        self.text(field).ok_or(ValidationError::MissingName)
    }

    /// Parses an integer field. Blank yields `None`.
    pub fn integer(&self, field: &str) -> Result<Option<i64>, ValidationError> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ValidationError::InvalidInteger {
                    field: field.to_string(),
                    value: raw,
                }),
        }
    }

    /// Parses an integer field that must not be negative.
    pub fn non_negative(&self, field: &str) -> Result<Option<u32>, ValidationError> {
        let Some(value) = self.integer(field)? else {
            return Ok(None);
        };
        if value < 0 {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }
        u32::try_from(value)
            .map(Some)
            .map_err(|_| ValidationError::InvalidInteger {
                field: field.to_string(),
                value: value.to_string(),
            })
    }

    /// Parses an http(s) URL field, returning the trimmed input unchanged when valid.
    pub fn url(&self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => match Url::parse(&raw) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Some(raw)),
                _ => Err(ValidationError::InvalidUrl {
                    field: field.to_string(),
                    value: raw,
                }),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Checks every field against its [`FieldSpec`], returning the first problem in schema order.
pub fn validate_values(schema: &[FieldSpec], values: &FormValues) -> Result<(), ValidationError> {
    for spec in schema {
        if spec.required && values.text(spec.name).is_none() {
            return Err(ValidationError::MissingName);
        }
        match spec.kind {
            FieldKind::Text | FieldKind::LongText => {}
            FieldKind::Integer { non_negative: true } => {
                values.non_negative(spec.name)?;
            }
            FieldKind::Integer { non_negative: false } => {
                values.integer(spec.name)?;
            }
            FieldKind::Url => {
                values.url(spec.name)?;
            }
        }
    }
    Ok(())
}
