use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Identity};
use crate::error::ApiError;

/// Authentication gate.
///
/// Locates a token (Bearer header first, `token` cookie as fallback),
/// verifies it, and attaches the resolved `Identity` to the request. The two
/// failure messages are fixed: "Missing token" when nothing was presented,
/// "Invalid token" for every verification failure, whatever its reason.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    let identity =
        auth::verify_token(&token).map_err(|_| ApiError::unauthorized("Invalid token"))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Token transport: `Authorization: Bearer <token>` wins over the cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.trim().is_empty() {
                return Some(token.trim().to_string());
            }
        }
    }
    cookie_value(headers, "token")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts
                .next()
                .filter(|value| !value.is_empty())
                .map(String::from);
        }
    }
    None
}

// Extractor so handlers can take the authenticated identity directly
#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Missing token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn bearer_header_is_preferred() {
        let map = headers(&[
            ("authorization", "Bearer header-token"),
            ("cookie", "token=cookie-token"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("header-token"));
    }

    #[test]
    fn cookie_is_fallback() {
        let map = headers(&[("cookie", "theme=dark; token=cookie-token; lang=en")]);
        assert_eq!(extract_token(&map).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn non_bearer_scheme_falls_back_to_cookie() {
        let map = headers(&[
            ("authorization", "Basic dXNlcjpwYXNz"),
            ("cookie", "token=cookie-token"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn no_token_anywhere() {
        assert_eq!(extract_token(&headers(&[])), None);
        assert_eq!(extract_token(&headers(&[("cookie", "theme=dark")])), None);
        assert_eq!(extract_token(&headers(&[("authorization", "Bearer  ")])), None);
    }
}
