// src/aggregate.rs
//! Per-query orchestration: cache lookup, concurrent upstream fetches, and
//! the fallback policy that keeps responses well-formed no matter what the
//! upstreams do.

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::api::AppState;
use crate::fallback::{mock_articles, mock_posts};
use crate::types::{CombinedResult, NormalizedArticle, NormalizedPost};
use crate::upstream::UpstreamError;

const AGGREGATION_FAILED_NOTE: &str =
    "Internal error while aggregating results; returning sample data.";

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "search_requests_total",
            "Search requests with a usable query."
        );
        describe_counter!(
            "search_cache_hits_total",
            "Search requests answered from the result cache."
        );
        describe_counter!(
            "upstream_fallbacks_total",
            "Upstream fetches downgraded to sample data, labeled by upstream."
        );
    });
}

/// Trim and collapse interior whitespace so equivalent queries share one
/// cache entry. Whitespace-only input collapses to the empty string.
pub fn normalize_query(raw: &str) -> String {
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(raw.trim(), " ").to_string()
}

// Never log raw query text. Only the hashed id.
fn query_digest(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn resolve_social(
    outcome: Result<Vec<NormalizedPost>, UpstreamError>,
    upstream: &str,
) -> (Vec<NormalizedPost>, Option<String>) {
    match outcome {
        Ok(posts) => (posts, None),
        Err(err) => {
            warn!(upstream, error = %err, "falling back to sample posts");
            counter!("upstream_fallbacks_total", "upstream" => upstream.to_ascii_lowercase())
                .increment(1);
            (mock_posts(), Some(err.caller_note(upstream)))
        }
    }
}

fn resolve_news(
    outcome: Result<Vec<NormalizedArticle>, UpstreamError>,
    upstream: &str,
) -> (Vec<NormalizedArticle>, Option<String>) {
    match outcome {
        Ok(articles) => (articles, None),
        Err(err) => {
            warn!(upstream, error = %err, "falling back to sample articles");
            counter!("upstream_fallbacks_total", "upstream" => upstream.to_ascii_lowercase())
                .increment(1);
            (mock_articles(), Some(err.caller_note(upstream)))
        }
    }
}

/// Answer one normalized query. Infallible by construction: every upstream
/// failure mode degrades to sample data inside a well-formed result.
pub async fn run_search(state: &AppState, query: &str) -> CombinedResult {
    ensure_metrics_described();
    counter!("search_requests_total").increment(1);
    let query_id = query_digest(query);

    if let Some(mut hit) = state.cache.get(query) {
        counter!("search_cache_hits_total").increment(1);
        info!(%query_id, "search served from cache");
        hit.cached = true;
        return hit;
    }

    // Independent tasks so one upstream's failure (or panic) cannot take the
    // other down with it.
    let social = Arc::clone(&state.social);
    let news = Arc::clone(&state.news);
    let social_query = query.to_string();
    let news_query = query.to_string();
    let social_task = tokio::spawn(async move { social.search(&social_query).await });
    let news_task = tokio::spawn(async move { news.search(&news_query).await });
    let (social_join, news_join) = tokio::join!(social_task, news_task);

    let (social_outcome, news_outcome) = match (social_join, news_join) {
        (Ok(social), Ok(news)) => (social, news),
        (social_join, news_join) => {
            if let Err(err) = social_join {
                warn!(upstream = "twitter", error = %err, "fetch task died");
            }
            if let Err(err) = news_join {
                warn!(upstream = "news", error = %err, "fetch task died");
            }
            warn!(%query_id, "aggregation degraded to sample data");
            return CombinedResult {
                posts: mock_posts(),
                articles: mock_articles(),
                social_error: None,
                news_error: None,
                cached: false,
                error: Some(AGGREGATION_FAILED_NOTE.to_string()),
            };
        }
    };

    let (posts, social_error) = resolve_social(social_outcome, state.social.name());
    let (articles, news_error) = resolve_news(news_outcome, state.news.name());

    let result = CombinedResult {
        posts,
        articles,
        social_error,
        news_error,
        cached: false,
        error: None,
    };
    state.cache.put(query, result.clone());
    info!(
        %query_id,
        posts = result.posts.len(),
        articles = result.articles.len(),
        social_fallback = result.social_error.is_some(),
        news_fallback = result.news_error.is_some(),
        "search aggregated"
    );
    result
}
