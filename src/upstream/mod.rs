// src/upstream/mod.rs
//! Outbound clients for the two third-party search APIs.
//!
//! Clients never apply fallback policy themselves: they report what happened
//! as an [`UpstreamError`] and the aggregator decides what the caller sees.

pub mod news;
pub mod social;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{NormalizedArticle, NormalizedPost};

/// Fixed per-call deadline; one attempt, no retry.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(4);

/// Everything that can go wrong talking to an upstream, including the
/// perfectly normal "no credential configured" state.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("credentials not configured")]
    NotConfigured,
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Generic caller-facing note. Raw status codes and transport detail stay
    /// in the server logs only.
    pub fn caller_note(&self, upstream: &str) -> String {
        match self {
            Self::NotConfigured => {
                format!("{upstream} API credentials not configured; returning sample data.")
            }
            Self::RateLimited => {
                format!("{upstream} API rate limit reached; returning sample data.")
            }
            Self::Timeout => {
                format!("{upstream} API request timed out; returning sample data.")
            }
            Self::Status(_) | Self::Decode(_) => {
                format!("{upstream} API returned an unexpected response; returning sample data.")
            }
            Self::Transport(_) => {
                format!("{upstream} API is unreachable; returning sample data.")
            }
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Social-post search seam; production uses [`social::TwitterClient`],
/// tests plug in counting or failing stubs.
#[async_trait]
pub trait SocialSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<NormalizedPost>, UpstreamError>;
    fn name(&self) -> &'static str;
}

/// News-article search seam; production uses [`news::NewsApiClient`].
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<NormalizedArticle>, UpstreamError>;
    fn name(&self) -> &'static str;
}

/// Shared outbound client: fixed timeouts, identifiable user agent.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("social-news-aggregator/0.1")
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("reqwest client")
}
