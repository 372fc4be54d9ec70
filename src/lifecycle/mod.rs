//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the gateway services.
//!
//! ## The CatalogSystem Pattern
//!
//! ```rust,ignore
//! let config = Config::from_env()?;
//! let system = CatalogSystem::start(&config)?;
//!
//! let home = system.home_view();
//! let suggestions = home.load_suggestions().await;
//!
//! system.shutdown().await?;
//! ```
//!
//! Services are created first and started afterwards with their context injected through
//! `run()`. The in-memory catalog service, for instance, is handed the actor and movie clients
//! it reads from. Shutdown drops every client, which closes the channels, then awaits the
//! service tasks.

pub mod catalog_system;
pub mod config;
pub mod tracing;

pub use catalog_system::*;
pub use config::*;
pub use self::tracing::setup_tracing;
