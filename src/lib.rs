//! # CinéBase
//!
//! > **Client core for a movie and actor catalog.**
//!
//! This crate talks to the CinéBase REST collaborator and keeps the state a catalog front end
//! needs: filtered record lists, the admin capability, the home screen's suggestions and
//! search, record editing, and client-side photo cropping.
//!
//! ## 🏗️ Design
//!
//! ### One generic record, two kinds
//! Actors and movies differ only by their fields. The [`Record`](framework::Record) trait
//! collects everything kind-specific (endpoint, field schema, draft conversion, filter
//! matching) so the gateway, list view and editor are written once over `T: Record`.
//!
//! ### Services and clients
//! Every gateway call is a message to a service task answered on a oneshot channel.
//! [`HttpResourceService`](framework::HttpResourceService) answers over HTTP;
//! [`MemoryResourceService`](framework::MemoryResourceService) is an in-memory collaborator
//! for offline demos and tests. Views only ever see the cloneable
//! [`ResourceClient`](framework::ResourceClient).
//!
//! ### Debounced filtering
//! Each list view owns a [`FilterManager`](filter::FilterManager): edits restart a quiet
//! period, fetches carry sequence numbers, and only the latest result is applied.
//!
//! ### Errors
//! Each layer has its own `thiserror` enum: [`GatewayError`](framework::GatewayError),
//! [`ActorError`](actors::ActorError) / [`MovieError`](movies::MovieError),
//! [`ViewError`](views::ViewError), [`CropError`](crop::CropError). Validation failures never
//! reach the network.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: record trait, messages, clients, HTTP and in-memory services, mocks.
//! - [`model`]: wire data structures.
//! - [`actors`], [`movies`]: the two record kinds.
//! - [`clients`]: kind-specific client wrappers.
//! - [`filter`]: filter set and debounced fetch manager.
//! - [`form`]: field schema, generic editor, autocomplete hints.
//! - [`crop`]: crop geometry and JPEG output.
//! - [`views`]: catalog, home and admin view-models.
//! - [`lifecycle`]: configuration, tracing, and the [`CatalogSystem`](lifecycle::CatalogSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against a running collaborator
//! CINEBASE_BACKEND_URL=http://localhost:8001 RUST_LOG=info cargo run -- "Cotillard"
//!
//! # Offline, with demo data
//! CINEBASE_OFFLINE=true cargo run
//! ```

pub mod actors;
pub mod clients;
pub mod crop;
pub mod filter;
pub mod form;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod movies;
pub mod views;
