//! Debounced, last-request-wins list filtering.
//!
//! [`FilterSet`] holds the raw field values; [`FilterManager`] owns one and drives fetches
//! through a [`ResourceClient`](crate::framework::ResourceClient).

pub mod manager;
pub mod set;

pub use manager::{FilterHandle, FilterManager, FilterPhase, FilterSnapshot, DEFAULT_DEBOUNCE};
pub use set::FilterSet;
