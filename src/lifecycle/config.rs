//! Runtime configuration from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CINEBASE_BACKEND_URL` | required unless offline |
//! | `CINEBASE_DEBOUNCE_MS` | `300` |
//! | `CINEBASE_REQUEST_TIMEOUT_SECS` | `30` |
//! | `CINEBASE_SUGGESTION_FALLBACK` | `6` |
//! | `CINEBASE_OFFLINE` | `false` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUGGESTION_FALLBACK: usize = 6;

/// Asset base used when no collaborator is configured.
const OFFLINE_ASSET_BASE: &str = "http://localhost:8001";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Collaborator base address; `None` in offline mode.
    pub backend_url: Option<Url>,
    pub debounce: Duration,
    pub request_timeout: Duration,
    /// Records per kind shown when suggestions are unavailable.
    pub suggestion_fallback: usize,
    /// Use the in-memory collaborator seeded with demo data.
    pub offline: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let offline = match lookup("CINEBASE_OFFLINE") {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CINEBASE_OFFLINE",
                        value: raw,
                    })
                }
            },
        };

        let backend_url = match lookup("CINEBASE_BACKEND_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid {
                name: "CINEBASE_BACKEND_URL",
                value: raw,
            })?),
            None if offline => None,
            None => return Err(ConfigError::Missing("CINEBASE_BACKEND_URL")),
        };

        let debounce_ms: u64 = parse_or(&lookup, "CINEBASE_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let timeout_secs: u64 = parse_or(
            &lookup,
            "CINEBASE_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let suggestion_fallback = parse_or(
            &lookup,
            "CINEBASE_SUGGESTION_FALLBACK",
            DEFAULT_SUGGESTION_FALLBACK,
        )?;

        Ok(Self {
            backend_url,
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            suggestion_fallback,
            offline,
        })
    }

    /// In-memory collaborator with defaults, for demos and tests.
    pub fn offline() -> Self {
        Self {
            backend_url: None,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            suggestion_fallback: DEFAULT_SUGGESTION_FALLBACK,
            offline: true,
        }
    }

    /// Base address photo paths are resolved against.
    pub fn asset_base(&self) -> Result<Url, url::ParseError> {
        match &self.backend_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(OFFLINE_ASSET_BASE),
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_backend_is_set() {
        let config =
            Config::from_lookup(lookup(&[("CINEBASE_BACKEND_URL", "http://localhost:8001")]))
                .unwrap();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.suggestion_fallback, 6);
        assert!(!config.offline);
        assert_eq!(config.asset_base().unwrap().as_str(), "http://localhost:8001/");
    }

    #[test]
    fn backend_is_required_unless_offline() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("CINEBASE_BACKEND_URL"))
        );
        let config = Config::from_lookup(lookup(&[("CINEBASE_OFFLINE", "true")])).unwrap();
        assert!(config.offline);
        assert_eq!(config.backend_url, None);
    }

    #[test]
    fn invalid_values_are_reported() {
        let result = Config::from_lookup(lookup(&[
            ("CINEBASE_BACKEND_URL", "http://localhost:8001"),
            ("CINEBASE_DEBOUNCE_MS", "soon"),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name: "CINEBASE_DEBOUNCE_MS",
                value: "soon".to_string()
            })
        );

        let result = Config::from_lookup(lookup(&[("CINEBASE_BACKEND_URL", "localhost")]));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
