use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered school/organization.
///
/// `tenant_id` is the opaque identifier every tenant-owned row is scoped by.
/// It is minted at registration and immutable; it is deliberately distinct
/// from the storage primary key `id` so the scoping identifier stays stable
/// across storage migrations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            name,
            slug,
            owner_user_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
