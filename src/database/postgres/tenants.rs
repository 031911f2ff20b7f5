use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::translate;
use crate::database::models::Tenant;
use crate::database::store::{StoreError, TenantRepo};

pub struct PgTenantRepo {
    pool: PgPool,
}

impl PgTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepo for PgTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tenants (id, tenant_id, name, slug, owner_user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tenant.id)
        .bind(tenant.tenant_id)
        .bind(&tenant.name)
        .bind(&tenant.slug)
        .bind(tenant.owner_user_id)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn set_owner(&self, id: Uuid, owner_user_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE tenants SET owner_user_id = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(owner_user_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Tenant not found".into()));
        }
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)
    }
}
