use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. Readiness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
