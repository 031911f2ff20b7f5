// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every failure in the system collapses into this taxonomy at the HTTP
/// boundary and is rendered as the uniform failure envelope
/// `{ "success": false, "message": "..." }`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found (also: exists, but under another tenant)
    NotFound(String),

    // 409 Conflict (uniqueness violations)
    Conflict(String),

    // 500 Internal Server Error - detail is logged, never echoed
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            // Internal detail stays server-side
            ApiError::Internal(_) => "Internal server error",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "message": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert storage errors into the API taxonomy at the boundary so that
// storage-specific shapes never leak to clients
impl From<crate::database::store::StoreError> for ApiError {
    fn from(err: crate::database::store::StoreError) -> Self {
        use crate::database::store::StoreError;
        match err {
            StoreError::Duplicate(field) => {
                ApiError::conflict(format!("{} already exists", field))
            }
            StoreError::NotFound(msg) => ApiError::not_found(msg),
            // Detail is logged once, by IntoResponse
            StoreError::Sqlx(e) => ApiError::internal(e.to_string()),
            StoreError::Unavailable(msg) => ApiError::internal(msg),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {}", detail);
        }
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::StoreError;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::conflict("x").status_code(), 409);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn internal_detail_is_not_echoed() {
        let err = ApiError::internal("connection refused to 10.0.0.3:5432");
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(
            err.to_json(),
            serde_json::json!({ "success": false, "message": "Internal server error" })
        );
    }

    #[test]
    fn duplicate_key_maps_to_conflict() {
        let err: ApiError = StoreError::Duplicate("email".into()).into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "email already exists");
    }

    #[test]
    fn failure_envelope_shape() {
        let body = ApiError::not_found("Student not found").to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Student not found");
        assert!(body.get("data").is_none());
    }
}
