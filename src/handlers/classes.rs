// handlers/classes.rs - /classes CRUD + by-teacher listing

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::Class;
use crate::database::store::Paginated;
use crate::error::ApiError;
use crate::middleware::{authorize, Action, Resource, TenantScope};
use crate::services::class_service::{
    ClassListQuery, ClassService, CreateClassRequest, UpdateClassRequest,
};

/// GET /classes - List classes in the active tenant (filters: academicYear,
/// classTeacher, q, includeInactive)
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<ClassListQuery>,
) -> Result<ApiResponse<Paginated<Class>>, ApiError> {
    authorize(&identity, Resource::Classes, Action::List)?;
    let classes = ClassService::new(state.store.clone())
        .list(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(classes, "Classes fetched"))
}

/// GET /classes/teacher/:teacherId - Classes taught by one teacher (the
/// teacher must belong to the active tenant)
pub async fn by_teacher(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(teacher_id): Path<Uuid>,
    Query(query): Query<ClassListQuery>,
) -> Result<ApiResponse<Paginated<Class>>, ApiError> {
    authorize(&identity, Resource::Classes, Action::List)?;
    let classes = ClassService::new(state.store.clone())
        .by_teacher(tenant_id, teacher_id, query)
        .await?;
    Ok(ApiResponse::success(classes, "Classes fetched"))
}

/// POST /classes - Create a class; the class teacher reference is checked
/// within the active tenant
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Json(payload): Json<CreateClassRequest>,
) -> Result<ApiResponse<Class>, ApiError> {
    authorize(&identity, Resource::Classes, Action::Create)?;
    let class = ClassService::new(state.store.clone())
        .create(tenant_id, payload)
        .await?;
    Ok(ApiResponse::created(class, "Class created"))
}

/// GET /classes/:id
pub async fn get(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Class>, ApiError> {
    authorize(&identity, Resource::Classes, Action::Read)?;
    let class = ClassService::new(state.store.clone())
        .get(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(class, "Class fetched"))
}

/// PUT /classes/:id
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<ApiResponse<Class>, ApiError> {
    authorize(&identity, Resource::Classes, Action::Update)?;
    let class = ClassService::new(state.store.clone())
        .update(tenant_id, id, payload)
        .await?;
    Ok(ApiResponse::success(class, "Class updated"))
}

/// DELETE /classes/:id - Soft delete
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Class>, ApiError> {
    authorize(&identity, Resource::Classes, Action::Delete)?;
    let class = ClassService::new(state.store.clone())
        .delete(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(class, "Class soft deleted"))
}
