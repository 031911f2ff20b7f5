use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::translate;
use crate::database::models::Attendance;
use crate::database::store::{AttendanceRepo, Page, StoreError};

pub struct PgAttendanceRepo {
    pool: PgPool,
}

impl PgAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepo for PgAttendanceRepo {
    async fn insert(&self, record: &Attendance) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO attendance
                (id, student_id, class_id, date, status, remarks, tenant_id,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(record.student_id)
        .bind(record.class_id)
        .bind(record.date)
        .bind(record.status)
        .bind(&record.remarks)
        .bind(record.tenant_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }

    async fn save(&self, record: &Attendance) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance SET
                student_id = $1, class_id = $2, date = $3, status = $4,
                remarks = $5, updated_at = $6
            WHERE tenant_id = $7 AND id = $8
            "#,
        )
        .bind(record.student_id)
        .bind(record.class_id)
        .bind(record.date)
        .bind(record.status)
        .bind(&record.remarks)
        .bind(record.updated_at)
        .bind(record.tenant_id)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Attendance not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError> {
        sqlx::query_as::<_, Attendance>(
            "DELETE FROM attendance WHERE tenant_id = $1 AND id = $2 RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<Attendance>, i64), StoreError> {
        let items = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT * FROM attendance
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(translate)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await
                .map_err(translate)?;

        Ok((items, total))
    }
}
