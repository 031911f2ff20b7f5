use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::translate;
use crate::database::models::Class;
use crate::database::store::{ClassFilter, ClassRepo, Page, StoreError};

pub struct PgClassRepo {
    pool: PgPool,
}

impl PgClassRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepo for PgClassRepo {
    async fn insert(&self, class: &Class) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO classes
                (id, class_name, monthly_tuition_fee, class_teacher, class_code,
                 description, academic_year, max_students, is_active, tenant_id,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(class.id)
        .bind(&class.class_name)
        .bind(class.monthly_tuition_fee)
        .bind(class.class_teacher)
        .bind(&class.class_code)
        .bind(&class.description)
        .bind(&class.academic_year)
        .bind(class.max_students)
        .bind(class.is_active)
        .bind(class.tenant_id)
        .bind(class.created_at)
        .bind(class.updated_at)
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
    ) -> Result<Option<Class>, StoreError> {
        sqlx::query_as::<_, Class>(
            r#"
            SELECT * FROM classes
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

    async fn save(&self, class: &Class) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE classes SET
                class_name = $1, monthly_tuition_fee = $2, class_teacher = $3,
                class_code = $4, description = $5, academic_year = $6,
                max_students = $7, is_active = $8, updated_at = $9
            WHERE tenant_id = $10 AND id = $11
            "#,
        )
        .bind(&class.class_name)
        .bind(class.monthly_tuition_fee)
        .bind(class.class_teacher)
        .bind(&class.class_code)
        .bind(&class.description)
        .bind(&class.academic_year)
        .bind(class.max_students)
        .bind(class.is_active)
        .bind(class.updated_at)
        .bind(class.tenant_id)
        .bind(class.id)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Class not found".into()));
        }
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &ClassFilter,
        page: &Page,
    ) -> Result<(Vec<Class>, i64), StoreError> {
        let pattern = filter.q.as_deref().map(|q| format!("%{}%", q));

        let items_query = sqlx::query_as::<_, Class>(
            r#"
            SELECT * FROM classes
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::text IS NULL OR academic_year = $3)
              AND ($4::uuid IS NULL OR class_teacher = $4)
              AND ($5::text IS NULL OR class_name ILIKE $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(&filter.academic_year)
        .bind(filter.class_teacher)
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM classes
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::text IS NULL OR academic_year = $3)
              AND ($4::uuid IS NULL OR class_teacher = $4)
              AND ($5::text IS NULL OR class_name ILIKE $5)
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(&filter.academic_year)
        .bind(filter.class_teacher)
        .bind(&pattern)
        .fetch_one(&self.pool);

        let (items, total) = futures::try_join!(items_query, count_query).map_err(translate)?;
        Ok((items, total))
    }
}
