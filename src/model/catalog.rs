use crate::model::{Actor, Movie};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Results of the global search, both kinds in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.movies.is_empty()
    }

    /// The first `n` hits of each kind.
    pub fn preview(&self, n: usize) -> SearchResults {
        SearchResults {
            actors: self.actors.iter().take(n).cloned().collect(),
            movies: self.movies.iter().take(n).cloned().collect(),
        }
    }
}

/// The collaborator's highlight of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    pub date: NaiveDate,
}
