// src/types.rs
//! Normalized shapes shared by the upstream clients, the cache, and the API.
//!
//! Wire names (`tweets`, `twitter_error`, `urlToImage`, ...) are pinned with
//! serde renames because the existing browser frontend binds to them.

use serde::{Deserialize, Serialize};

/// Author block nested inside a normalized post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub name: String,
    pub username: String,
    pub profile_image_url: String,
}

/// One social post after normalization, regardless of what the upstream sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub id: String,
    pub text: String,
    /// Upstream-native timestamp, passed through verbatim (never reparsed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "user")]
    pub author: PostAuthor,
    /// Never empty: falls back to one placeholder entry.
    pub images: Vec<String>,
}

/// One news article after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub image_url: String,
    /// Always a plain string, even when the upstream sends a source object.
    #[serde(rename = "source")]
    pub source_name: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// The assembled response for one search, also the unit stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    #[serde(rename = "tweets")]
    pub posts: Vec<NormalizedPost>,
    pub articles: Vec<NormalizedArticle>,
    /// Caller-facing note when the social upstream fell back to sample data.
    #[serde(
        rename = "twitter_error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub social_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_error: Option<String>,
    pub cached: bool,
    /// Set only when aggregation itself failed and the whole payload is
    /// sample data; the response still ships as HTTP 200.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
