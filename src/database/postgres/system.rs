use async_trait::async_trait;
use sqlx::PgPool;

use super::translate;
use crate::database::models::AuthSession;
use crate::database::store::{CounterRepo, HealthProbe, SessionRepo, StoreError};

pub struct PgSessionRepo {
    pool: PgPool,
}

impl PgSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepo for PgSessionRepo {
    async fn insert(&self, session: &AuthSession) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (id, user_id, tenant_id, ip, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.tenant_id)
        .bind(&session.ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }
}

pub struct PgCounterRepo {
    pool: PgPool,
}

impl PgCounterRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepo for PgCounterRepo {
    async fn next(&self, key: &str) -> Result<i64, StoreError> {
        // Atomic find-and-increment: the upsert runs as a single statement,
        // so concurrent callers never observe the same sequence value
        sqlx::query_scalar(
            r#"
            INSERT INTO counters (key, seq) VALUES ($1, 1)
            ON CONFLICT (key) DO UPDATE SET seq = counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)
    }
}

pub struct PgHealthProbe {
    pool: PgPool,
}

impl PgHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        Ok(())
    }
}
