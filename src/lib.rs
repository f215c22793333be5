// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod fallback;
pub mod metrics;
pub mod placeholder;
pub mod types;
pub mod upstream;

// ---- Re-exports for stable public API ----
// Router construction: `crate_root::api::create_router` or `crate_root::create_router`
pub use crate::api::{create_router, AppState};
pub use crate::types::{CombinedResult, NormalizedArticle, NormalizedPost, PostAuthor};
