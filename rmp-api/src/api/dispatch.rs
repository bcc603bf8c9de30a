//! Dispatch endpoint
//!
//! Accepts a JSON request envelope and returns the mirrored response
//! envelope. Structural dispatch errors map to 400 with an error body;
//! store failures map to 500. Business failures arrive inside a 200
//! response envelope with `success: false`; they are not HTTP errors.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::warn;

use rmp_core::{DispatchError, RequestEnvelope};

use crate::AppState;

pub async fn dispatch(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Response {
    match state.router.dispatch(envelope).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            warn!("dispatch failed: {err}");
            let (status, error) = classify(&err);
            (
                status,
                Json(json!({
                    "error": error,
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

fn classify(err: &DispatchError) -> (StatusCode, &'static str) {
    match err {
        DispatchError::MissingRequest
        | DispatchError::MissingField(_)
        | DispatchError::UnexpectedDiscriminant { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_request")
        }
        DispatchError::UnsupportedKind(_) | DispatchError::UnsupportedOperation(_) => {
            (StatusCode::BAD_REQUEST, "unsupported_operation")
        }
        DispatchError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}
