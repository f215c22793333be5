// tests/e2e_smoke.rs

use shuttle_axum::axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for `oneshot` (tower 0.5 with features=["util"])

use social_news_aggregator::api::{self, AppState};
use social_news_aggregator::config::Settings;

/// Build the router through the same env-driven wiring the binary uses.
/// Credentials are removed first, so the smoke test never leaves the process.
fn env_wired_router() -> Router {
    std::env::remove_var("TWITTER_BEARER_TOKEN");
    std::env::remove_var("NEWSAPI_KEY");
    std::env::set_var("SEARCH_CACHE_TTL_MS", "60000");

    let settings = Settings::from_env();
    api::create_router(AppState::from_settings(&settings))
}

#[tokio::test]
#[serial_test::serial]
async fn smoke_search_round_trip() {
    let app = env_wired_router();

    let req = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"query":"market news"}"#))
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let s = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(s.contains("\"tweets\""));
    assert!(s.contains("\"articles\""));
    assert!(s.contains("\"cached\""));
}

#[tokio::test]
#[serial_test::serial]
async fn smoke_health_round_trip() {
    let app = env_wired_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let s = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(s.contains("\"healthy\""));
}
