// handlers/tenants.rs - POST /tenants/register handler

use axum::extract::State;
use axum::Json;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::tenant_service::{RegisterTenantRequest, RegistrationResult, TenantService};

/// POST /tenants/register - Register a new tenant and its owner account
///
/// Unauthenticated: this is where tenants and identities come from in the
/// first place.
///
/// Expected Input:
/// ```json
/// {
///   "name": "Greenwood",              // Required: display name
///   "slug": "greenwood",              // Optional: derived from name if absent
///   "ownerName": "Alice",             // Required
///   "ownerEmail": "a@x.com",          // Required: unique across all tenants
///   "ownerPassword": "pw123456"       // Required: min 8 chars
/// }
/// ```
///
/// Returns 201 with `{ tenant, owner }`; the owner is created with role
/// `schooladmin` and the password is never echoed back.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTenantRequest>,
) -> Result<ApiResponse<RegistrationResult>, ApiError> {
    let result = TenantService::new(state.store.clone())
        .register(payload)
        .await?;
    Ok(ApiResponse::created(result, "Tenant registered"))
}
