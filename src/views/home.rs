//! # Home View
//!
//! The landing screen: the collaborator's daily suggestions and the global search box.
//!
//! Suggestions never fail from the caller's point of view. When the collaborator cannot
//! produce them, the view shows the most recent records of each kind with today's date, and
//! when even that fails the affected lists are empty.

use crate::framework::{CatalogClient, ListQuery, Record, ResourceClient};
use crate::model::{Actor, Movie, SearchResults, Suggestions};
use crate::views::asset_url;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Hits of each kind shown in the search dropdown.
pub const SEARCH_PREVIEW: usize = 3;

/// Outcome of a global search.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSearch {
    pub query: String,
    pub results: SearchResults,
    /// The first [`SEARCH_PREVIEW`] hits of each kind.
    pub preview: SearchResults,
    /// Set when the search failed; `results` is then empty.
    pub error: Option<String>,
}

pub struct HomeView {
    catalog: CatalogClient,
    actors: ResourceClient<Actor>,
    movies: ResourceClient<Movie>,
    fallback_count: usize,
    asset_base: Url,
}

impl HomeView {
    pub fn new(
        catalog: CatalogClient,
        actors: ResourceClient<Actor>,
        movies: ResourceClient<Movie>,
        fallback_count: usize,
        asset_base: Url,
    ) -> Self {
        Self {
            catalog,
            actors,
            movies,
            fallback_count,
            asset_base,
        }
    }

    /// Today's suggestions, or the most recent records when the collaborator has none to give.
    #[instrument(skip(self))]
    pub async fn load_suggestions(&self) -> Suggestions {
        match self.catalog.suggestions().await {
            Ok(suggestions) => {
                debug!(
                    actors = suggestions.actors.len(),
                    movies = suggestions.movies.len(),
                    date = %suggestions.date,
                    "Suggestions loaded"
                );
                suggestions
            }
            Err(e) => {
                warn!(error = %e, "Suggestions unavailable, showing recent records");
                self.recent_records().await
            }
        }
    }

    /// Each kind falls back on its own: a failed list empties only that kind, the other
    /// still shows its newest records.
    async fn recent_records(&self) -> Suggestions {
        let n = self.fallback_count;
        let (actors, movies) = tokio::join!(
            self.actors.list(ListQuery::recent(n)),
            self.movies.list(ListQuery::recent(n))
        );
        Suggestions {
            actors: most_recent(actors, n, "actors"),
            movies: most_recent(movies, n, "movies"),
            date: chrono::Local::now().date_naive(),
        }
    }

    /// Runs the global search. Blank input sends nothing and yields `None`.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Option<HomeSearch> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank query, nothing to search");
            return None;
        }

        let (results, error) = match self.catalog.search(query.to_string()).await {
            Ok(results) => {
                info!(
                    actors = results.actors.len(),
                    movies = results.movies.len(),
                    "Search complete"
                );
                (results, None)
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                (SearchResults::default(), Some(e.to_string()))
            }
        };
        Some(HomeSearch {
            query: query.to_string(),
            preview: results.preview(SEARCH_PREVIEW),
            results,
            error,
        })
    }

    pub fn photo_url<T: Record>(&self, record: &T) -> Option<Url> {
        record
            .photo_path()
            .and_then(|path| asset_url(&self.asset_base, path))
    }
}

fn most_recent<T>(
    result: Result<Vec<T>, crate::framework::GatewayError>,
    n: usize,
    what: &str,
) -> Vec<T> {
    match result {
        Ok(mut records) => {
            records.truncate(n);
            records
        }
        Err(e) => {
            warn!(error = %e, what, "Fallback list failed");
            Vec::new()
        }
    }
}
