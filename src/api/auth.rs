//! Session-token authentication for the admin API.
//!
//! The dashboard presents its session as `Authorization: Bearer <token>`;
//! requests without a valid token are rejected with 401 before reaching any
//! handler. When no token is configured the check is disabled, which is only
//! meant for local development.

use crate::api::{AppState, response::ApiError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Middleware rejecting requests that don't carry the dashboard token.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = &state.dashboard_token else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected);

    if authorized {
        next.run(request).await
    } else {
        ApiError::unauthorized().into_response()
    }
}
