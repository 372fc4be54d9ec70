//! `cinebase` demo binary: loads the home screen and optionally runs a global search.
//!
//! ```bash
//! CINEBASE_OFFLINE=true cargo run -- "drame"
//! ```

use cinebase::lifecycle::{setup_tracing, CatalogSystem, Config};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    info!(
        offline = config.offline,
        backend = ?config.backend_url.as_ref().map(|u| u.as_str()),
        "Starting CinéBase"
    );

    let system = CatalogSystem::start(&config).map_err(|e| e.to_string())?;
    if config.offline {
        system.seed_demo().await.map_err(|e| e.to_string())?;
    }

    {
        let home = system.home_view();

        let suggestions = home
            .load_suggestions()
            .instrument(tracing::info_span!("home"))
            .await;
        info!(date = %suggestions.date, "Suggestions of the day");
        for actor in &suggestions.actors {
            info!(name = %actor.name, photo = ?home.photo_url(actor).map(String::from), "Actor");
        }
        for movie in &suggestions.movies {
            info!(name = %movie.name, year = ?movie.year, "Movie");
        }

        let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
        if let Some(found) = home
            .search(&query)
            .instrument(tracing::info_span!("search"))
            .await
        {
            if let Some(e) = &found.error {
                error!(error = %e, query = %found.query, "Search failed");
            }
            for actor in &found.preview.actors {
                info!(name = %actor.name, "Matching actor");
            }
            for movie in &found.preview.movies {
                info!(name = %movie.name, "Matching movie");
            }
            info!(
                actors = found.results.actors.len(),
                movies = found.results.movies.len(),
                "Search results"
            );
        }
    }

    system.shutdown().await.map_err(|e| e.to_string())
}
