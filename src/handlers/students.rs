// handlers/students.rs - /students CRUD + search + by-class listing

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::Student;
use crate::database::store::Paginated;
use crate::error::ApiError;
use crate::middleware::{authorize, Action, Resource, TenantScope};
use crate::services::student_service::{
    CreateStudentRequest, StudentListQuery, StudentService, UpdateStudentRequest,
};

/// GET /students - List students in the active tenant (paginated; filters:
/// classId, q, includeInactive)
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<StudentListQuery>,
) -> Result<ApiResponse<Paginated<Student>>, ApiError> {
    authorize(&identity, Resource::Students, Action::List)?;
    let students = StudentService::new(state.store.clone())
        .list(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(students, "Students fetched"))
}

/// GET /students/search?q=... - Substring search over name, registration
/// number and mobile number
pub async fn search(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Query(query): Query<StudentListQuery>,
) -> Result<ApiResponse<Paginated<Student>>, ApiError> {
    authorize(&identity, Resource::Students, Action::List)?;
    let students = StudentService::new(state.store.clone())
        .search(tenant_id, query)
        .await?;
    Ok(ApiResponse::success(students, "Students fetched"))
}

/// GET /students/class/:classId - Students of one class (class must belong
/// to the active tenant)
pub async fn by_class(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(class_id): Path<Uuid>,
    Query(query): Query<StudentListQuery>,
) -> Result<ApiResponse<Paginated<Student>>, ApiError> {
    authorize(&identity, Resource::Students, Action::List)?;
    let students = StudentService::new(state.store.clone())
        .by_class(tenant_id, class_id, query)
        .await?;
    Ok(ApiResponse::success(students, "Students fetched"))
}

/// POST /students - Create a student; the registration number is generated,
/// the tenant comes from the request context, never the payload
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<ApiResponse<Student>, ApiError> {
    authorize(&identity, Resource::Students, Action::Create)?;
    let student = StudentService::new(state.store.clone())
        .create(tenant_id, payload)
        .await?;
    Ok(ApiResponse::created(student, "Student created"))
}

/// GET /students/:id
pub async fn get(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Student>, ApiError> {
    authorize(&identity, Resource::Students, Action::Read)?;
    let student = StudentService::new(state.store.clone())
        .get(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(student, "Student fetched"))
}

/// PUT /students/:id
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<ApiResponse<Student>, ApiError> {
    authorize(&identity, Resource::Students, Action::Update)?;
    let student = StudentService::new(state.store.clone())
        .update(tenant_id, id, payload)
        .await?;
    Ok(ApiResponse::success(student, "Student updated"))
}

/// DELETE /students/:id - Soft delete
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    TenantScope(tenant_id): TenantScope,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Student>, ApiError> {
    authorize(&identity, Resource::Students, Action::Delete)?;
    let student = StudentService::new(state.store.clone())
        .delete(tenant_id, id)
        .await?;
    Ok(ApiResponse::success(student, "Student soft deleted"))
}
