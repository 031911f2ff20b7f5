use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::translate;
use crate::database::models::Teacher;
use crate::database::store::{Page, StoreError, TeacherFilter, TeacherRepo};

pub struct PgTeacherRepo {
    pool: PgPool,
}

impl PgTeacherRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepo for PgTeacherRepo {
    async fn insert(&self, teacher: &Teacher) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO teachers
                (id, employee_name, employee_id, picture, mobile_number, joining_date,
                 role, monthly_salary, father_or_husband_name, national_id, education,
                 gender, religion, blood_group, experience, email, date_of_birth,
                 address, status, is_active, tenant_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23)
            "#,
        )
        .bind(teacher.id)
        .bind(&teacher.employee_name)
        .bind(&teacher.employee_id)
        .bind(&teacher.picture)
        .bind(&teacher.mobile_number)
        .bind(teacher.joining_date)
        .bind(teacher.role)
        .bind(teacher.monthly_salary)
        .bind(&teacher.father_or_husband_name)
        .bind(&teacher.national_id)
        .bind(&teacher.education)
        .bind(teacher.gender)
        .bind(&teacher.religion)
        .bind(&teacher.blood_group)
        .bind(teacher.experience)
        .bind(&teacher.email)
        .bind(teacher.date_of_birth)
        .bind(&teacher.address)
        .bind(teacher.status)
        .bind(teacher.is_active)
        .bind(teacher.tenant_id)
        .bind(teacher.created_at)
        .bind(teacher.updated_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Teacher>, StoreError> {
        sqlx::query_as::<_, Teacher>(
            r#"
            SELECT * FROM teachers
            WHERE tenant_id = $1 AND id = $2 AND ($3 OR is_active = TRUE)
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(include_inactive)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }

    async fn save(&self, teacher: &Teacher) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE teachers SET
                employee_name = $1, picture = $2, mobile_number = $3,
                joining_date = $4, role = $5, monthly_salary = $6,
                father_or_husband_name = $7, national_id = $8, education = $9,
                gender = $10, religion = $11, blood_group = $12, experience = $13,
                email = $14, date_of_birth = $15, address = $16, status = $17,
                is_active = $18, updated_at = $19
            WHERE tenant_id = $20 AND id = $21
            "#,
        )
        .bind(&teacher.employee_name)
        .bind(&teacher.picture)
        .bind(&teacher.mobile_number)
        .bind(teacher.joining_date)
        .bind(teacher.role)
        .bind(teacher.monthly_salary)
        .bind(&teacher.father_or_husband_name)
        .bind(&teacher.national_id)
        .bind(&teacher.education)
        .bind(teacher.gender)
        .bind(&teacher.religion)
        .bind(&teacher.blood_group)
        .bind(teacher.experience)
        .bind(&teacher.email)
        .bind(teacher.date_of_birth)
        .bind(&teacher.address)
        .bind(teacher.status)
        .bind(teacher.is_active)
        .bind(teacher.updated_at)
        .bind(teacher.tenant_id)
        .bind(teacher.id)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Teacher not found".into()));
        }
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &TeacherFilter,
        page: &Page,
    ) -> Result<(Vec<Teacher>, i64), StoreError> {
        let pattern = filter.q.as_deref().map(|q| format!("%{}%", q));

        let items_query = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT * FROM teachers
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::staff_role IS NULL OR role = $3)
              AND ($4::staff_status IS NULL OR status = $4)
              AND ($5::text IS NULL
                   OR employee_name ILIKE $5
                   OR employee_id ILIKE $5
                   OR mobile_number ILIKE $5
                   OR email ILIKE $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(filter.role)
        .bind(filter.status)
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM teachers
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::staff_role IS NULL OR role = $3)
              AND ($4::staff_status IS NULL OR status = $4)
              AND ($5::text IS NULL
                   OR employee_name ILIKE $5
                   OR employee_id ILIKE $5
                   OR mobile_number ILIKE $5
                   OR email ILIKE $5)
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(filter.role)
        .bind(filter.status)
        .bind(&pattern)
        .fetch_one(&self.pool);

        let (items, total) = futures::try_join!(items_query, count_query).map_err(translate)?;
        Ok((items, total))
    }
}
