use crate::form::{validate_values, FieldSpec, FormValues};
use crate::framework::{Record, RecordDraft, SaveTarget, ValidationError};
use std::marker::PhantomData;

/// Editor state for one record of kind `T`.
///
/// Holds raw string input until [`RecordForm::build`] validates it and produces the kind's
/// draft. The form never talks to the gateway; saving is done by the view.
#[derive(Debug, Clone)]
pub struct RecordForm<T: Record> {
    target: SaveTarget,
    values: FormValues,
    _kind: PhantomData<T>,
}

impl<T: Record> RecordForm<T> {
    /// An empty form for a new record.
    pub fn new() -> Self {
        Self {
            target: SaveTarget::New,
            values: FormValues::new(),
            _kind: PhantomData,
        }
    }

    /// A form prefilled from an existing record.
    pub fn edit(record: &T) -> Self {
        Self {
            target: SaveTarget::Existing(record.id().clone()),
            values: record.form_values(),
            _kind: PhantomData,
        }
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        T::schema()
    }

    pub fn target(&self) -> &SaveTarget {
        &self.target
    }

    pub fn is_new(&self) -> bool {
        self.target == SaveTarget::New
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_values(T::schema(), &self.values)
    }

    /// Validates the input and builds the draft. Blank optionals become `None`.
    pub fn build(&self) -> Result<T::Draft, ValidationError> {
        self.validate()?;
        let draft = T::draft_from_form(&self.values)?;
        draft.validate()?;
        Ok(draft)
    }
}

impl<T: Record> Default for RecordForm<T> {
    fn default() -> Self {
        Self::new()
    }
}
