//! # Observability
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle and completed operations
//! RUST_LOG=debug cargo run           # payloads, queries, filter edits
//! RUST_LOG=cinebase::filter=debug cargo run
//! ```
//!
//! Structured fields carry the context: `kind` (actor or movie), `id`, `seq` for filter
//! fetches. Payloads are logged once at `debug` where a call enters the system:
//!
//! ```text
//! DEBUG save:save called kind=actor target=New draft=ActorDraft { name: "Alice", .. }
//! INFO  Created kind=actor id="actor_1"
//! INFO  Photo stored kind=actor id="actor_1" path="/uploads/actors/actor_1.jpg"
//! DEBUG Discarding stale result kind=actor seq=2 latest=3
//! ```
//!
//! Degraded paths (fallback suggestions, failed fetches kept on stale data, failed uploads
//! after a save) log at `warn`.

/// Initializes the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false) // `kind` identifies the record type
        .compact()
        .init();
}
