//! JSON response envelope and error translation for the admin API.
//!
//! Success bodies are `{"success": true, "data": …}`; failures are
//! `{"error": "…"}` with 400 for validation, 401 for a missing session, 404
//! for missing rows, 500 for database/internal failures, and 503 for the
//! stock paths' database failures.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Handler result type: success JSON or a translated error.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wraps a payload in the success envelope.
pub fn success<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Success envelope without a payload, for delete-style routes.
#[must_use]
pub fn success_empty() -> Json<serde_json::Value> {
    Json(json!({ "success": true }))
}

/// A user-facing API error: status code plus translated message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Builds an error with an explicit status code.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 validation failure.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 missing/invalid session.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    /// Translates a core error, mapping database failures on the stock paths
    /// to 503 the way the dashboard's stock endpoints do.
    #[must_use]
    pub fn storage_unavailable(error: Error) -> Self {
        if matches!(error, Error::Database(_)) {
            error!("Database error on stock path: {error}");
            return Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Error connecting to the database",
            );
        }
        Self::from(error)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let (status, message) = match &error {
            Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Error::OptionLimitReached { limit } => (
                StatusCode::BAD_REQUEST,
                format!("The maximum of {limit} options for this menu has been reached"),
            ),
            Error::GiveawayAlreadyRunning { .. } => (
                StatusCode::BAD_REQUEST,
                "A giveaway is already running on this server".to_string(),
            ),
            Error::OptionNotFound { .. } => {
                (StatusCode::NOT_FOUND, "The option does not exist".to_string())
            }
            Error::Database(_) => {
                error!("Database error: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            _ => {
                error!("Internal error: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Unwraps a required request field, translating absence into the
/// "<field> is required" 400 the dashboard shows.
pub fn require<T>(value: Option<T>, name: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::bad_request(format!("{name} is required")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let e = ApiError::from(Error::Validation {
            message: "bad".to_string(),
        });
        assert_eq!(e.status, StatusCode::BAD_REQUEST);

        let e = ApiError::from(Error::OptionLimitReached { limit: 25 });
        assert_eq!(e.status, StatusCode::BAD_REQUEST);

        let e = ApiError::from(Error::OptionNotFound { option_id: 7 });
        assert_eq!(e.status, StatusCode::NOT_FOUND);

        let e = ApiError::from(Error::GiveawayAlreadyRunning {
            server_id: "s".to_string(),
        });
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_stock_paths_map_database_errors_to_503() {
        let db_error = Error::Database(sea_orm::DbErr::Custom("down".to_string()));
        let e = ApiError::storage_unavailable(db_error);
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);

        // Non-database errors keep their normal mapping
        let e = ApiError::storage_unavailable(Error::Validation {
            message: "bad".to_string(),
        });
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_require_translates_missing_fields() {
        assert!(require(Some(1), "serverId").is_ok());
        let e = require::<i32>(None, "serverId").unwrap_err();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "serverId is required");
    }
}
