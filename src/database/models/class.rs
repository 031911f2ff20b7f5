use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A class/section. `class_name` is unique within a tenant, never globally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub class_name: String,
    pub monthly_tuition_fee: Decimal,
    /// References a Teacher in the same tenant (checked at write time)
    pub class_teacher: Uuid,

    pub class_code: Option<String>,
    pub description: Option<String>,
    pub academic_year: Option<String>,
    pub max_students: Option<i32>,

    pub is_active: bool,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub fn new(
        tenant_id: Uuid,
        class_name: String,
        monthly_tuition_fee: Decimal,
        class_teacher: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            class_name,
            monthly_tuition_fee,
            class_teacher,
            class_code: None,
            description: None,
            academic_year: None,
            max_students: None,
            is_active: true,
            tenant_id,
            created_at: now,
            updated_at: now,
        }
    }
}
