//! Liveness and readiness probes.

use axum::http::StatusCode;

/// GET /livez
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// GET /readyz
///
/// The gateway holds no state, so it is ready as soon as it is listening.
pub async fn readyz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
