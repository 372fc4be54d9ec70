//! Generic record editing: a field schema per kind, a form holding raw string input, and
//! autocomplete hints for free-text fields.

pub mod editor;
pub mod hints;
pub mod schema;

pub use editor::RecordForm;
pub use hints::Hints;
pub use schema::{validate_values, FieldKind, FieldSpec, FormValues};
