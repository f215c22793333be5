// src/config.rs
//! Environment-sourced settings, loaded once at startup.
//!
//! Both upstream credentials are optional: a missing key simply routes that
//! upstream to sample data, it is never a startup failure. The literal
//! sample values shipped in `.env` templates count as "not configured" too.

use std::time::Duration;

use tracing::info;

pub const ENV_TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
pub const ENV_CACHE_TTL_MS: &str = "SEARCH_CACHE_TTL_MS";

/// Cached results stay valid for five minutes unless overridden.
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

const TWITTER_TOKEN_SAMPLE: &str = "your_twitter_bearer_token_here";
const NEWSAPI_KEY_SAMPLE: &str = "your_newsapi_key_here";

#[derive(Debug, Clone)]
pub struct Settings {
    pub twitter_bearer_token: Option<String>,
    pub newsapi_key: Option<String>,
    pub cache_ttl: Duration,
}

impl Settings {
    /// Read all settings from the process environment.
    pub fn from_env() -> Self {
        Self {
            twitter_bearer_token: configured_value(
                std::env::var(ENV_TWITTER_BEARER_TOKEN).ok(),
                TWITTER_TOKEN_SAMPLE,
            ),
            newsapi_key: configured_value(
                std::env::var(ENV_NEWSAPI_KEY).ok(),
                NEWSAPI_KEY_SAMPLE,
            ),
            cache_ttl: Duration::from_millis(parse_ttl_env(
                std::env::var(ENV_CACHE_TTL_MS).ok(),
            )),
        }
    }

    /// One-line startup summary so operators can see which upstreams are live.
    pub fn log_startup_summary(&self) {
        info!(
            twitter_configured = self.twitter_bearer_token.is_some(),
            newsapi_configured = self.newsapi_key.is_some(),
            cache_ttl_ms = self.cache_ttl.as_millis() as u64,
            "upstream configuration loaded"
        );
    }
}

/// Treat empty strings and the well-known sample value as "not configured".
fn configured_value(raw: Option<String>, sample: &str) -> Option<String> {
    raw.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != sample)
}

fn parse_ttl_env(raw: Option<String>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_MS)
}
