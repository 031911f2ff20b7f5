// handlers/attendance.rs - /attendance CRUD

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::Attendance;
use crate::database::store::Paginated;
use crate::error::ApiError;
use crate::middleware::{authorize, Action, Resource, TenantScope};
use crate::services::attendance_service::{
    AttendanceListQuery, AttendanceService, CreateAttendanceRequest, UpdateAttendanceRequest,
};

/// GET /attendance - List attendance records in the active tenant
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<AttendanceListQuery>,
) -> Result<ApiResponse<Paginated<Attendance>>, ApiError> {
    authorize(&identity, Resource::Attendance, Action::List)?;
    let records = AttendanceService::new(state.store.clone())
        .list(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(records, "Attendance fetched"))
}

/// POST /attendance - Mark attendance; one record per (student, date).
/// Student and class references are checked within the active tenant.
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Json(payload): Json<CreateAttendanceRequest>,
) -> Result<ApiResponse<Attendance>, ApiError> {
    authorize(&identity, Resource::Attendance, Action::Create)?;
    let record = AttendanceService::new(state.store.clone())
        .create(tenant_id, payload)
        .await?;
    Ok(ApiResponse::created(record, "Attendance created"))
}

/// GET /attendance/:id
pub async fn get(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Attendance>, ApiError> {
    authorize(&identity, Resource::Attendance, Action::Read)?;
    let record = AttendanceService::new(state.store.clone())
        .get(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(record, "Attendance fetched"))
}

/// PUT /attendance/:id
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendanceRequest>,
) -> Result<ApiResponse<Attendance>, ApiError> {
    authorize(&identity, Resource::Attendance, Action::Update)?;
    let record = AttendanceService::new(state.store.clone())
        .update(tenant_id, id, payload)
        .await?;
    Ok(ApiResponse::success(record, "Attendance updated"))
}

/// DELETE /attendance/:id - Physical delete (no soft-delete flag here)
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Attendance>, ApiError> {
    authorize(&identity, Resource::Attendance, Action::Delete)?;
    let record = AttendanceService::new(state.store.clone())
        .delete(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(record, "Attendance deleted"))
}
