//! Chat dispatch HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::gateway::{DispatchRequest, NormalizedReply};
use crate::server::AppState;

/// POST /api/chat
///
/// Body rejections are answered in the same `{"error": ...}` shape as
/// dispatch failures.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Invalid chat request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(NormalizedReply::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    let (status, reply) = state.gateway.handle(request).await;
    (status, Json(reply)).into_response()
}
