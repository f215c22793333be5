// src/upstream/social.rs
//! Twitter v2 recent-search client and response mapping.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::{http_client, SocialSearch, UpstreamError};
use crate::placeholder::{avatar_placeholder, post_image_placeholder};
use crate::types::{NormalizedPost, PostAuthor};

const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
const MAX_RESULTS: &str = "10";

pub struct TwitterClient {
    http: reqwest::Client,
    bearer_token: Option<String>,
}

impl TwitterClient {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            http: http_client(),
            bearer_token,
        }
    }
}

#[async_trait]
impl SocialSearch for TwitterClient {
    async fn search(&self, query: &str) -> Result<Vec<NormalizedPost>, UpstreamError> {
        let bearer = self
            .bearer_token
            .as_deref()
            .ok_or(UpstreamError::NotConfigured)?;

        // Restrict to posts that carry media; expansions pull authors and
        // media objects into `includes` so mapping needs no second call.
        let full_query = format!("{query} has:images");
        let resp = self
            .http
            .get(RECENT_SEARCH_URL)
            .bearer_auth(bearer)
            .query(&[
                ("query", full_query.as_str()),
                ("max_results", MAX_RESULTS),
                ("tweet.fields", "author_id,created_at,text,attachments"),
                ("expansions", "author_id,attachments.media_keys"),
                ("user.fields", "name,username,profile_image_url"),
                (
                    "media.fields",
                    "media_key,type,url,preview_image_url",
                ),
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
            warn!(status = status.as_u16(), body = %snippet, "twitter search failed");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let payload: RecentSearchResponse = resp.json().await?;
        Ok(map_posts(payload))
    }

    fn name(&self) -> &'static str {
        "Twitter"
    }
}

#[derive(Debug, Deserialize)]
struct RecentSearchResponse {
    #[serde(default)]
    data: Vec<ApiTweet>,
    #[serde(default)]
    includes: ApiIncludes,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<String>,
    attachments: Option<ApiAttachments>,
}

#[derive(Debug, Deserialize)]
struct ApiAttachments {
    #[serde(default)]
    media_keys: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiIncludes {
    #[serde(default)]
    users: Vec<ApiUser>,
    #[serde(default)]
    media: Vec<ApiMedia>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    name: Option<String>,
    username: Option<String>,
    profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMedia {
    media_key: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
    preview_image_url: Option<String>,
}

/// Join tweets with their expanded authors and media. Pure so it can be
/// exercised with canned payloads.
fn map_posts(payload: RecentSearchResponse) -> Vec<NormalizedPost> {
    let users: HashMap<&str, &ApiUser> = payload
        .includes
        .users
        .iter()
        .map(|u| (u.id.as_str(), u))
        .collect();
    let media: HashMap<&str, &ApiMedia> = payload
        .includes
        .media
        .iter()
        .map(|m| (m.media_key.as_str(), m))
        .collect();

    payload
        .data
        .iter()
        .map(|tweet| {
            let author = tweet
                .author_id
                .as_deref()
                .and_then(|id| users.get(id))
                .map(|u| PostAuthor {
                    name: u.name.clone().unwrap_or_else(|| "Unknown User".to_string()),
                    username: u.username.clone().unwrap_or_else(|| "unknown".to_string()),
                    profile_image_url: u
                        .profile_image_url
                        .clone()
                        .unwrap_or_else(|| avatar_placeholder().to_string()),
                })
                .unwrap_or_else(|| PostAuthor {
                    name: "Unknown User".to_string(),
                    username: "unknown".to_string(),
                    profile_image_url: avatar_placeholder().to_string(),
                });

            let mut images: Vec<String> = tweet
                .attachments
                .iter()
                .flat_map(|a| a.media_keys.iter())
                .filter_map(|key| media.get(key.as_str()))
                .filter(|m| m.kind.as_deref() == Some("photo"))
                .filter_map(|m| m.url.clone().or_else(|| m.preview_image_url.clone()))
                .collect();
            if images.is_empty() {
                images.push(post_image_placeholder());
            }

            NormalizedPost {
                id: tweet.id.clone(),
                text: tweet.text.clone(),
                created_at: tweet.created_at.clone(),
                author,
                images,
            }
        })
        .collect()
}
