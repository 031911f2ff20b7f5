use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;

/// The active tenant for this request.
///
/// This is the single source of tenant scoping for every downstream data
/// access. Handlers never read a tenant id out of a request body or query
/// string as the authorization source; payload-supplied tenant ids are at
/// most ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope(pub Uuid);

/// Tenant scoper. Runs strictly after the authentication gate and copies the
/// tenant out of the verified identity. The identity always carries a tenant
/// in practice; the checks below keep the failure mode defined rather than
/// panicking if that ever stops holding.
pub async fn tenant_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| ApiError::unauthorized("Tenant not found in token"))?;

    if identity.tenant_id.is_nil() {
        return Err(ApiError::unauthorized("Tenant not found in token"));
    }

    let scope = TenantScope(identity.tenant_id);
    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantScope>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("Tenant not found in token"))
    }
}
