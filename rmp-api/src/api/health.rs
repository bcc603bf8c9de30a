//! Health check endpoint (no auth)

use axum::extract::State;
use axum::response::Json;
use serde_json::json;

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "rmp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
    }))
}
