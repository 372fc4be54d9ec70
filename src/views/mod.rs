//! Headless view-models for the catalog screens.
//!
//! Views hold state and enforce the admin capability; rendering is left to the caller.

pub mod admin;
pub mod catalog;
pub mod error;
pub mod home;

pub use admin::{AdminMode, AdminToggle};
pub use catalog::{asset_url, CatalogView, Confirm};
pub use error::ViewError;
pub use home::{HomeSearch, HomeView, SEARCH_PREVIEW};
