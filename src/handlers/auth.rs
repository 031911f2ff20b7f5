// handlers/auth.rs - POST /auth/login handler

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::config;
use crate::error::ApiError;
use crate::services::auth_service::{AuthService, ClientInfo, LoginRequest};

/// Login cookie lifetime: 7 days
const COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// POST /auth/login - Authenticate user and receive a token
///
/// Expected Input:
/// ```json
/// {
///   "email": "a@x.com",           // Required
///   "password": "pw123456",       // Required
///   "tenantSlug": "greenwood"     // One of tenantId / tenantSlug required
/// }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "data": { "token": "eyJhbGciOiJIUzI1NiI...", "user": { ... } }
/// }
/// ```
///
/// The token is also set as an http-only `token` cookie (SameSite=Lax,
/// Secure in production). An unknown email and a wrong password produce the
/// same 401 body.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let client = client_info(&headers);
    let result = AuthService::new(state.store.clone())
        .login(payload, client)
        .await?;

    let cookie = login_cookie(&result.token);
    let mut response = ApiResponse::success(result, "Login successful").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| ApiError::internal(e.to_string()))?,
    );
    Ok(response)
}

fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    ClientInfo { ip, user_agent }
}

fn login_cookie(token: &str) -> String {
    let mut cookie = format!(
        "token={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token, COOKIE_MAX_AGE_SECS
    );
    if config::config().security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_attributes() {
        let cookie = login_cookie("abc.def.ghi");
        assert!(cookie.starts_with("token=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn client_info_takes_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("user-agent", HeaderValue::from_static("test-agent/1.0"));
        let info = client_info(&headers);
        assert_eq!(info.ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(info.user_agent.as_deref(), Some("test-agent/1.0"));
    }
}
