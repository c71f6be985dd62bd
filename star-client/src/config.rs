//! Client configuration.
//!
//! Defaults point at a collection service on `localhost:3000`. Each value can be
//! overridden through the environment:
//!
//! - `STARS_API_URL`: base URL of the collection service
//! - `STARS_HTTP_TIMEOUT_SECS`: per-request timeout for the HTTP gateway
//! - `STARS_BIO_EXCERPT_CHARS`: bio characters shown on a card

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::profile_cards::DEFAULT_BIO_EXCERPT_CHARS;

/// Where the collection service runs when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

pub const API_URL_VAR: &str = "STARS_API_URL";
pub const HTTP_TIMEOUT_VAR: &str = "STARS_HTTP_TIMEOUT_SECS";
pub const BIO_EXCERPT_VAR: &str = "STARS_BIO_EXCERPT_CHARS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub bio_excerpt_chars: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            bio_excerpt_chars: DEFAULT_BIO_EXCERPT_CHARS,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any `STARS_*` environment variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    name: API_URL_VAR,
                    value: url.to_string(),
                    reason: "expected an http:// or https:// URL",
                });
            }
            config.api_base_url = url.to_string();
        }

        if let Some(raw) = lookup(HTTP_TIMEOUT_VAR) {
            config.request_timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: HTTP_TIMEOUT_VAR,
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            };
        }

        if let Some(raw) = lookup(BIO_EXCERPT_VAR) {
            config.bio_excerpt_chars =
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: BIO_EXCERPT_VAR,
                        value: raw.clone(),
                        reason: "expected a character count",
                    })?;
        }

        Ok(config)
    }
}
