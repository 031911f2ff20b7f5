use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::{Gender, StaffRole, StaffStatus};

/// Staff record (teachers, admins, accountants, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: Uuid,
    pub employee_name: String,
    /// Generated `EMP-YYYY-NNNN`, globally unique, immutable after creation
    pub employee_id: String,
    pub picture: Option<String>,
    pub mobile_number: String,
    pub joining_date: DateTime<Utc>,
    pub role: StaffRole,
    pub monthly_salary: Decimal,

    pub father_or_husband_name: Option<String>,
    pub national_id: Option<String>,
    pub education: Option<String>,
    pub gender: Option<Gender>,
    pub religion: Option<String>,
    pub blood_group: Option<String>,
    pub experience: Option<i32>,
    pub email: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: Option<String>,

    pub status: StaffStatus,
    pub is_active: bool,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(
        tenant_id: Uuid,
        employee_name: String,
        employee_id: String,
        mobile_number: String,
        joining_date: DateTime<Utc>,
        role: StaffRole,
        monthly_salary: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            employee_name,
            employee_id,
            picture: None,
            mobile_number,
            joining_date,
            role,
            monthly_salary,
            father_or_husband_name: None,
            national_id: None,
            education: None,
            gender: None,
            religion: None,
            blood_group: None,
            experience: None,
            email: None,
            date_of_birth: None,
            address: None,
            status: StaffStatus::Active,
            is_active: true,
            tenant_id,
            created_at: now,
            updated_at: now,
        }
    }
}
