//! PostgreSQL store.
//!
//! Every query against a tenant-owned table carries `tenant_id` in its WHERE
//! clause; uniqueness lives in database constraints and surfaces as
//! `StoreError::Duplicate` via `translate`.

use std::sync::Arc;

use sqlx::PgPool;

use crate::database::store::{Store, StoreError};

mod attendance;
mod classes;
mod students;
mod system;
mod teachers;
mod tenants;
mod users;

pub fn store(pool: PgPool) -> Store {
    Store {
        tenants: Arc::new(tenants::PgTenantRepo::new(pool.clone())),
        users: Arc::new(users::PgUserRepo::new(pool.clone())),
        students: Arc::new(students::PgStudentRepo::new(pool.clone())),
        teachers: Arc::new(teachers::PgTeacherRepo::new(pool.clone())),
        classes: Arc::new(classes::PgClassRepo::new(pool.clone())),
        attendance: Arc::new(attendance::PgAttendanceRepo::new(pool.clone())),
        sessions: Arc::new(system::PgSessionRepo::new(pool.clone())),
        counters: Arc::new(system::PgCounterRepo::new(pool.clone())),
        probe: Arc::new(system::PgHealthProbe::new(pool)),
    }
}

/// Translate driver errors into the storage taxonomy. Unique violations
/// (SQLSTATE 23505) become `Duplicate` with the client-facing field label
/// derived from the constraint name; everything else passes through.
pub(crate) fn translate(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let field = match db_err.constraint() {
                Some("tenants_slug_key") => "slug",
                Some("tenants_tenant_id_key") => "tenantId",
                Some("users_tenant_id_email_key") => "email",
                Some("students_registration_no_key") => "registrationNo",
                Some("teachers_employee_id_key") => "employeeId",
                Some("teachers_tenant_id_email_key") => "email",
                Some("classes_tenant_id_class_name_key") => "className",
                Some("classes_tenant_id_class_code_key") => "classCode",
                Some("attendance_tenant_id_student_id_date_key") => "attendance",
                _ => "record",
            };
            return StoreError::Duplicate(field.into());
        }
    }
    StoreError::Sqlx(err)
}
