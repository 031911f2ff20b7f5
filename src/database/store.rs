//! Storage abstraction.
//!
//! Every repository method that touches a tenant-owned entity takes the
//! active tenant id and conjoins it with whatever other filter applies. A
//! lookup that matches by id alone, without the tenant filter, is a defect:
//! callers must not be able to observe rows owned by another tenant, not
//! even their existence.
//!
//! Two implementations exist: `postgres` (production) and `memory` (test
//! fake with the same uniqueness behavior).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Attendance, AuthSession, Class, Student, Teacher, Tenant, User};
use crate::types::{StaffRole, StaffStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation; the field label is client-facing ("email",
    /// "slug", "className", ...)
    #[error("{0} already exists")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Normalize raw query values: page >= 1, 1 <= limit <= MAX_PAGE_LIMIT
    pub fn clamped(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: &Page, total: i64) -> Self {
        let total_pages = ((total + page.limit - 1) / page.limit).max(1);
        Self {
            page: page.page,
            limit: page.limit,
            total,
            total_pages,
            has_next: page.page < total_pages,
            has_prev: page.page > 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: &Page, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(page, total),
        }
    }
}

// ---------------------------------------------------------------------------
// List filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub include_inactive: bool,
    pub class_id: Option<Uuid>,
    /// Case-insensitive substring over name / registration no / mobile
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherFilter {
    pub include_inactive: bool,
    pub role: Option<StaffRole>,
    pub status: Option<StaffStatus>,
    /// Case-insensitive substring over name / employee id / mobile / email
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub include_inactive: bool,
    pub academic_year: Option<String>,
    pub class_teacher: Option<Uuid>,
    /// Case-insensitive substring over class name
    pub q: Option<String>,
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TenantRepo: Send + Sync {
    async fn insert(&self, tenant: &Tenant) -> Result<(), StoreError>;
    async fn set_owner(&self, id: Uuid, owner_user_id: Uuid) -> Result<(), StoreError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError>;
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    /// Registration-time global uniqueness check; the one deliberate
    /// tenant-free lookup in the system (no tenant context exists yet)
    async fn find_by_email_any_tenant(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, tenant_id: Uuid, email: &str)
        -> Result<Option<User>, StoreError>;
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait StudentRepo: Send + Sync {
    async fn insert(&self, student: &Student) -> Result<(), StoreError>;
    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Student>, StoreError>;
    /// Full-row update, keyed by (tenant_id, id)
    async fn save(&self, student: &Student) -> Result<(), StoreError>;
    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &StudentFilter,
        page: &Page,
    ) -> Result<(Vec<Student>, i64), StoreError>;
}

#[async_trait]
pub trait TeacherRepo: Send + Sync {
    async fn insert(&self, teacher: &Teacher) -> Result<(), StoreError>;
    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Teacher>, StoreError>;
    async fn save(&self, teacher: &Teacher) -> Result<(), StoreError>;
    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &TeacherFilter,
        page: &Page,
    ) -> Result<(Vec<Teacher>, i64), StoreError>;
}

#[async_trait]
pub trait ClassRepo: Send + Sync {
    async fn insert(&self, class: &Class) -> Result<(), StoreError>;
    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Class>, StoreError>;
    async fn save(&self, class: &Class) -> Result<(), StoreError>;
    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &ClassFilter,
        page: &Page,
    ) -> Result<(Vec<Class>, i64), StoreError>;
}

#[async_trait]
pub trait AttendanceRepo: Send + Sync {
    async fn insert(&self, record: &Attendance) -> Result<(), StoreError>;
    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError>;
    async fn save(&self, record: &Attendance) -> Result<(), StoreError>;
    /// Physical delete; returns the removed record if it existed in-tenant
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError>;
    async fn list(
        &self,
        tenant_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<Attendance>, i64), StoreError>;
}

#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn insert(&self, session: &AuthSession) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CounterRepo: Send + Sync {
    /// Atomic find-and-increment; each call yields a fresh value even under
    /// concurrent creation
    async fn next(&self, key: &str) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Handle bundling every repository; cheap to clone, shared via AppState
#[derive(Clone)]
pub struct Store {
    pub tenants: Arc<dyn TenantRepo>,
    pub users: Arc<dyn UserRepo>,
    pub students: Arc<dyn StudentRepo>,
    pub teachers: Arc<dyn TeacherRepo>,
    pub classes: Arc<dyn ClassRepo>,
    pub attendance: Arc<dyn AttendanceRepo>,
    pub sessions: Arc<dyn SessionRepo>,
    pub counters: Arc<dyn CounterRepo>,
    pub probe: Arc<dyn HealthProbe>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        crate::database::postgres::store(pool)
    }

    /// In-memory fake. Test-only by policy: `main` never constructs this.
    pub fn memory() -> Self {
        crate::database::memory::store()
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.probe.ping().await
    }
}
