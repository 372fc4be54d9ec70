//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actors_client;
pub mod movies_client;
pub mod record_client;

pub use actors_client::*;
pub use movies_client::*;
pub use record_client::*;
