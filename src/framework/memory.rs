//! # In-Memory Collaborator
//!
//! A stand-in for the REST backend, used by offline mode and by tests that need real filtering
//! semantics. [`MemoryResourceService`] owns a store for one record kind and answers requests
//! sequentially, so the store needs no lock. [`MemoryCatalogService`] answers the catalog-wide
//! calls by querying the two resource services it is given at `run()` time.

use crate::framework::{
    CatalogClient, CatalogRequest, GatewayError, ListQuery, Record, RecordDraft, RecordId,
    ResourceClient, ResourceRequest,
};
use crate::model::{Actor, Movie, SearchResults, Suggestions};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Maximum records per kind in a daily suggestion.
pub const SUGGESTION_COUNT: usize = 6;

/// Owns the records of one kind, in creation order.
pub struct MemoryResourceService<T: Record> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id: u32,
}

impl<T: Record> MemoryResourceService<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store: Vec::new(),
            next_id: 1,
        };
        (service, ResourceClient::new(sender))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.store.iter().position(|record| record.id() == id)
    }

    /// Newest first, AND across every active constraint, then `limit`.
    fn list(&self, query: &ListQuery) -> Vec<T> {
        let matching = self.store.iter().rev().filter(|record| {
            query
                .params
                .iter()
                .all(|(field, value)| record.matches_filter(field, value))
        });
        match query.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }

    pub async fn run(mut self) {
        let kind = T::KIND;
        info!(%kind, "Memory service started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { query, respond_to } => {
                    let records = self.list(&query);
                    debug!(%kind, ?query, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|pos| self.store[pos].clone());
                    debug!(%kind, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { draft, respond_to } => {
                    debug!(%kind, ?draft, "Create");
                    if let Err(e) = draft.validate() {
                        warn!(%kind, error = %e, "Create rejected");
                        let _ = respond_to.send(Err(e.into()));
                        continue;
                    }
                    let id: RecordId = format!("{}_{}", kind.label(), self.next_id);
                    self.next_id += 1;
                    self.store.push(T::from_draft(id.clone(), draft));
                    info!(%kind, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    debug!(%kind, %id, ?draft, "Update");
                    if let Err(e) = draft.validate() {
                        warn!(%kind, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(e.into()));
                        continue;
                    }
                    match self.position(&id) {
                        Some(pos) => {
                            self.store[pos].apply_draft(draft);
                            info!(%kind, %id, "Updated");
                            let _ = respond_to.send(Ok(self.store[pos].clone()));
                        }
                        None => {
                            warn!(%kind, %id, "Not found");
                            let _ = respond_to.send(Err(GatewayError::NotFound(id)));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(%kind, %id, "Delete");
                    match self.position(&id) {
                        Some(pos) => {
                            self.store.remove(pos);
                            info!(%kind, %id, size = self.store.len(), "Deleted");
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(%kind, %id, "Not found");
                            let _ = respond_to.send(Err(GatewayError::NotFound(id)));
                        }
                    }
                }
                ResourceRequest::UploadPhoto {
                    id,
                    photo,
                    respond_to,
                } => {
                    debug!(%kind, %id, ?photo, "UploadPhoto");
                    match self.position(&id) {
                        Some(pos) => {
                            let path = format!("/uploads/{}/{}.jpg", kind.collection(), id);
                            self.store[pos].set_photo_path(path.clone());
                            info!(%kind, %id, %path, "Photo stored");
                            let _ = respond_to.send(Ok(path));
                        }
                        None => {
                            warn!(%kind, %id, "Not found");
                            let _ = respond_to.send(Err(GatewayError::NotFound(id)));
                        }
                    }
                }
            }
        }

        info!(%kind, size = self.store.len(), "Shutdown");
    }
}

/// Clients the catalog service reads from.
pub type CatalogContext = (ResourceClient<Actor>, ResourceClient<Movie>);

/// Answers catalog-wide requests from the two memory stores.
pub struct MemoryCatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
}

impl MemoryCatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, CatalogClient::new(sender))
    }

    /// Runs until every client has been dropped. The context clients are held for the
    /// lifetime of the loop.
    pub async fn run(mut self, context: CatalogContext) {
        let (actors, movies) = context;
        info!("Memory catalog service started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Genres { respond_to } => {
                    let result = movies
                        .list(ListQuery::all())
                        .await
                        .map(|all| distinct(all.iter().map(|m| m.genre.as_deref())));
                    let _ = respond_to.send(result);
                }
                CatalogRequest::Nationalities { respond_to } => {
                    let result = actors
                        .list(ListQuery::all())
                        .await
                        .map(|all| distinct(all.iter().map(|a| a.nationality.as_deref())));
                    let _ = respond_to.send(result);
                }
                CatalogRequest::Search { query, respond_to } => {
                    debug!(%query, "Search");
                    let by_text = ListQuery {
                        params: vec![("search".to_string(), query)],
                        limit: None,
                    };
                    let (found_actors, found_movies) =
                        tokio::join!(actors.list(by_text.clone()), movies.list(by_text));
                    let result = match (found_actors, found_movies) {
                        (Ok(actors), Ok(movies)) => Ok(SearchResults { actors, movies }),
                        (Err(e), _) | (_, Err(e)) => Err(e),
                    };
                    let _ = respond_to.send(result);
                }
                CatalogRequest::Suggestions { respond_to } => {
                    let date = chrono::Local::now().date_naive();
                    let (all_actors, all_movies) =
                        tokio::join!(actors.list(ListQuery::all()), movies.list(ListQuery::all()));
                    let result = match (all_actors, all_movies) {
                        (Ok(all_actors), Ok(all_movies)) => Ok(Suggestions {
                            actors: daily_pick(&all_actors, date),
                            movies: daily_pick(&all_movies, date),
                            date,
                        }),
                        (Err(e), _) | (_, Err(e)) => Err(e),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!("Memory catalog service shutdown");
    }
}

/// Sorted, de-duplicated, non-empty values.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Up to [`SUGGESTION_COUNT`] records, rotated by the calendar day so the same day always
/// yields the same pick.
pub fn daily_pick<T: Clone>(records: &[T], date: NaiveDate) -> Vec<T> {
    if records.is_empty() {
        return Vec::new();
    }
    let offset = date.num_days_from_ce().unsigned_abs() as usize % records.len();
    records
        .iter()
        .cycle()
        .skip(offset)
        .take(SUGGESTION_COUNT.min(records.len()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_pick_is_stable_within_a_day() {
        let records: Vec<u32> = (0..10).collect();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(daily_pick(&records, day), daily_pick(&records, day));
        assert_eq!(daily_pick(&records, day).len(), SUGGESTION_COUNT);
    }

    #[test]
    fn daily_pick_rotates_between_days() {
        let records: Vec<u32> = (0..10).collect();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let tuesday = monday.succ_opt().unwrap();
        assert_ne!(daily_pick(&records, monday), daily_pick(&records, tuesday));
    }

    #[test]
    fn daily_pick_never_repeats_small_collections() {
        let records = vec!["a", "b"];
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut picked = daily_pick(&records, day);
        picked.sort();
        assert_eq!(picked, vec!["a", "b"]);
    }

    #[test]
    fn distinct_drops_blanks_and_duplicates() {
        let values = vec![Some("Drame"), None, Some(" "), Some("Action"), Some("Drame")];
        assert_eq!(distinct(values.into_iter()), vec!["Action", "Drame"]);
    }
}
