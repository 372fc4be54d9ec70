//! Pure data structures exchanged with the collaborator.
//!
//! Field names on the wire are the collaborator's (`nom`, `annee`, ...); the Rust names are
//! English and mapped with `serde(rename)`.

pub mod actor;
pub mod catalog;
pub mod movie;

pub use actor::*;
pub use catalog::*;
pub use movie::*;
