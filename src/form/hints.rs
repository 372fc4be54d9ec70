//! Autocomplete hints for free-text fields such as genre and nationality.
//!
//! Hints only ever suggest. Whatever the user types is submitted as-is.

use crate::framework::CatalogClient;
use tracing::warn;

/// A list of known values to offer while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    options: Vec<String>,
}

impl Hints {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }

    /// Movie genres known to the collaborator. Empty when the call fails.
    pub async fn genres(catalog: &CatalogClient) -> Self {
        match catalog.genres().await {
            Ok(options) => Self::new(options),
            Err(e) => {
                warn!(error = %e, "Genre hints unavailable");
                Self::default()
            }
        }
    }

    /// Actor nationalities known to the collaborator. Empty when the call fails.
    pub async fn nationalities(catalog: &CatalogClient) -> Self {
        match catalog.nationalities().await {
            Ok(options) => Self::new(options),
            Err(e) => {
                warn!(error = %e, "Nationality hints unavailable");
                Self::default()
            }
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Options matching `input`: case-insensitive prefix matches first, then substring
    /// matches. Blank input offers everything.
    pub fn suggest(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        let mut prefix = Vec::new();
        let mut infix = Vec::new();
        for option in &self.options {
            let lower = option.to_lowercase();
            if lower.starts_with(&needle) {
                prefix.push(option.as_str());
            } else if lower.contains(&needle) {
                infix.push(option.as_str());
            }
        }

        let mut seen = Vec::with_capacity(prefix.len() + infix.len());
        for option in prefix.into_iter().chain(infix) {
            if !seen.contains(&option) {
                seen.push(option);
            }
        }
        seen
    }
}
