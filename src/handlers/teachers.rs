// handlers/teachers.rs - /teachers CRUD + search + by-role listing

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::Teacher;
use crate::database::store::Paginated;
use crate::error::ApiError;
use crate::middleware::{authorize, Action, Resource, TenantScope};
use crate::services::teacher_service::{
    CreateTeacherRequest, TeacherListQuery, TeacherService, UpdateTeacherRequest,
};

/// GET /teachers - List staff in the active tenant (filters: role, status,
/// q, includeInactive)
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<TeacherListQuery>,
) -> Result<ApiResponse<Paginated<Teacher>>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::List)?;
    let teachers = TeacherService::new(state.store.clone())
        .list(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(teachers, "Teachers fetched"))
}

/// GET /teachers/search?q=... - Substring search over name, employee id,
/// mobile number and email
pub async fn search(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<TeacherListQuery>,
) -> Result<ApiResponse<Paginated<Teacher>>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::List)?;
    let teachers = TeacherService::new(state.store.clone())
        .search(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(teachers, "Teachers fetched"))
}

/// GET /teachers/role/:role - Staff of one role (e.g. "Accountant")
pub async fn by_role(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(role): Path<String>,
    Query(query): Query<TeacherListQuery>,
) -> Result<ApiResponse<Paginated<Teacher>>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::List)?;
    let teachers = TeacherService::new(state.store.clone())
        .by_role(tenant_id, &role, query)
        .await?;
    Ok(ApiResponse::success(teachers, "Teachers fetched"))
}

/// POST /teachers - Create a staff record; the employee id is generated
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<ApiResponse<Teacher>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::Create)?;
    let teacher = TeacherService::new(state.store.clone())
        .create(tenant_id, payload)
        .await?;
    Ok(ApiResponse::created(teacher, "Teacher created"))
}

/// GET /teachers/:id
pub async fn get(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Teacher>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::Read)?;
    let teacher = TeacherService::new(state.store.clone())
        .get(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(teacher, "Teacher fetched"))
}

/// PUT /teachers/:id
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<ApiResponse<Teacher>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::Update)?;
    let teacher = TeacherService::new(state.store.clone())
        .update(tenant_id, id, payload)
        .await?;
    Ok(ApiResponse::success(teacher, "Teacher updated"))
}

/// DELETE /teachers/:id - Soft delete (also marks staff status Inactive)
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Teacher>, ApiError> {
    authorize(&identity, Resource::Teachers, Action::Delete)?;
    let teacher = TeacherService::new(state.store.clone())
        .delete(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(teacher, "Teacher soft deleted"))
}
