// src/api.rs
//! HTTP surface: the search endpoint, health check, and CORS plumbing.

use std::sync::Arc;

use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::aggregate::{normalize_query, run_search};
use crate::cache::ResultCache;
use crate::config::Settings;
use crate::upstream::news::NewsApiClient;
use crate::upstream::social::TwitterClient;
use crate::upstream::{NewsSearch, SocialSearch};

#[derive(Clone)]
pub struct AppState {
    pub social: Arc<dyn SocialSearch>,
    pub news: Arc<dyn NewsSearch>,
    pub cache: Arc<ResultCache>,
}

impl AppState {
    /// Production wiring: real upstream clients plus a shared result cache.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            social: Arc::new(TwitterClient::new(settings.twitter_bearer_token.clone())),
            news: Arc::new(NewsApiClient::new(settings.newsapi_key.clone())),
            cache: Arc::new(ResultCache::with_ttl(settings.cache_ttl)),
        }
    }
}

/// Build the application router. State is injected so tests can swap the
/// upstream clients for stubs.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search).options(preflight))
        // Wildcard CORS: the frontend is served from a different origin and
        // sends no credentials.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct SearchReq {
    #[serde(default)]
    query: Option<String>,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(serde::Serialize)]
struct HealthResp {
    status: &'static str,
    message: &'static str,
}

async fn search(State(state): State<AppState>, Json(body): Json<SearchReq>) -> impl IntoResponse {
    let query = normalize_query(body.query.as_deref().unwrap_or(""));
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Missing 'query' in request",
            }),
        )
            .into_response();
    }
    Json(run_search(&state, &query).await).into_response()
}

async fn health() -> Json<HealthResp> {
    Json(HealthResp {
        status: "healthy",
        message: "Server is running",
    })
}

// The CORS layer answers true preflights before they reach the router; this
// keeps bare OPTIONS probes (no Access-Control-Request-Method) at 200 too.
async fn preflight() -> StatusCode {
    StatusCode::OK
}
