//! rmp-api library - HTTP transport for the Research Match Platform core
//!
//! Thin axum wiring: the dispatch endpoint forwards request envelopes to
//! the module router; everything interesting happens in rmp-core.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use rmp_core::ModuleRouter;

pub mod api;
pub mod notify;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Module router over the configured entity store
    pub router: Arc<ModuleRouter>,
    /// Server port (reported by /health)
    pub port: u16,
}

impl AppState {
    pub fn new(router: Arc<ModuleRouter>, port: u16) -> Self {
        Self { router, port }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/dispatch", post(api::dispatch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
