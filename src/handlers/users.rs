// handlers/users.rs - /users management (schooladmin only)

use axum::extract::State;
use axum::Json;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{authorize, Action, Resource, TenantScope};
use crate::services::user_service::{CreateUserRequest, UserService};

/// GET /users - List accounts in the active tenant
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
) -> Result<ApiResponse<Vec<User>>, ApiError> {
    authorize(&identity, Resource::Users, Action::List)?;
    let users = UserService::new(state.store.clone()).list(tenant_id).await?;
    Ok(ApiResponse::success(users, "Users fetched"))
}

/// POST /users - Create an account inside the active tenant; role defaults
/// to `student`
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Json(payload): Json<CreateUserRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    authorize(&identity, Resource::Users, Action::Create)?;
    let user = UserService::new(state.store.clone())
        .create(tenant_id, payload)
        .await?;
    Ok(ApiResponse::created(user, "User created"))
}
