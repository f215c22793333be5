// src/upstream/news.rs
//! NewsAPI "everything" client and response mapping.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::{http_client, NewsSearch, UpstreamError};
use crate::placeholder::article_image_placeholder;
use crate::types::NormalizedArticle;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const PAGE_SIZE: &str = "5";

pub struct NewsApiClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: http_client(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<NormalizedArticle>, UpstreamError> {
        let key = self.api_key.as_deref().ok_or(UpstreamError::NotConfigured)?;

        let resp = self
            .http
            .get(EVERYTHING_URL)
            .query(&[
                ("q", query),
                ("pageSize", PAGE_SIZE),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("apiKey", key),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(UpstreamError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            warn!(status = status.as_u16(), body = %snippet, "news search failed");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let payload: EverythingResponse = resp.json().await?;
        Ok(map_articles(payload))
    }

    fn name(&self) -> &'static str {
        "News"
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    source: Option<ApiSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

/// NewsAPI usually nests the source as `{"id": ..., "name": ...}` but some
/// mirrors flatten it to a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiSource {
    Detailed { name: Option<String> },
    Plain(String),
}

impl ApiSource {
    fn display_name(&self) -> Option<&str> {
        match self {
            Self::Detailed { name } => name.as_deref(),
            Self::Plain(name) => Some(name.as_str()),
        }
    }
}

/// Empty strings count as missing, matching how the frontend treats them.
fn non_empty(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

fn map_articles(payload: EverythingResponse) -> Vec<NormalizedArticle> {
    let image_fallback = article_image_placeholder();
    payload
        .articles
        .into_iter()
        .map(|article| {
            let source_name = article
                .source
                .as_ref()
                .and_then(|s| s.display_name())
                .filter(|name| !name.is_empty())
                .unwrap_or("Unknown Source")
                .to_string();

            NormalizedArticle {
                title: non_empty(article.title, "No title"),
                description: non_empty(article.description, "No description"),
                url: non_empty(article.url, "#"),
                image_url: non_empty(article.url_to_image, &image_fallback),
                source_name,
                published_at: article.published_at.unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> EverythingResponse {
        serde_json::from_value(value).expect("fixture parses")
    }

    #[test]
    fn maps_complete_article() {
        let payload = parse(json!({
            "articles": [
                {
                    "title": "Rust 2.0 announced",
                    "description": "Not really.",
                    "url": "https://news.example/rust-2",
                    "urlToImage": "https://news.example/rust-2.jpg",
                    "source": {"id": "example", "name": "Example News"},
                    "publishedAt": "2024-05-01T10:00:00Z"
                }
            ]
        }));

        let articles = map_articles(payload);
        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title, "Rust 2.0 announced");
        assert_eq!(a.source_name, "Example News");
        assert_eq!(a.published_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn string_source_is_accepted() {
        let payload = parse(json!({
            "articles": [
                {"title": "t", "source": "Plain Wire"}
            ]
        }));
        assert_eq!(map_articles(payload)[0].source_name, "Plain Wire");
    }

    #[test]
    fn missing_or_null_source_becomes_unknown() {
        let payload = parse(json!({
            "articles": [
                {"title": "no source field"},
                {"title": "null source", "source": null},
                {"title": "nameless source", "source": {"id": "x"}}
            ]
        }));
        for article in map_articles(payload) {
            assert_eq!(article.source_name, "Unknown Source");
        }
    }

    #[test]
    fn missing_fields_get_defaults() {
        let payload = parse(json!({"articles": [{}]}));
        let a = &map_articles(payload)[0];
        assert_eq!(a.title, "No title");
        assert_eq!(a.description, "No description");
        assert_eq!(a.url, "#");
        assert!(a.image_url.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(a.source_name, "Unknown Source");
        assert_eq!(a.published_at, "");
    }

    #[test]
    fn empty_strings_get_defaults_too() {
        let payload = parse(json!({
            "articles": [
                {"title": "", "description": "", "url": "", "urlToImage": "", "source": {"name": ""}}
            ]
        }));
        let a = &map_articles(payload)[0];
        assert_eq!(a.title, "No title");
        assert_eq!(a.description, "No description");
        assert_eq!(a.url, "#");
        assert!(a.image_url.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(a.source_name, "Unknown Source");
    }

    #[test]
    fn empty_payload_maps_to_empty_vec() {
        assert!(map_articles(parse(json!({}))).is_empty());
    }

    #[tokio::test]
    async fn missing_key_reports_not_configured() {
        let client = NewsApiClient::new(None);
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotConfigured));
    }
}
