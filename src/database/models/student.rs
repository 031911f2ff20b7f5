use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::Gender;

/// Guardian details embedded in a student record (stored as JSONB)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentInfo {
    pub name: Option<String>,
    pub education: Option<String>,
    pub national_id: Option<String>,
    pub mobile: Option<String>,
    pub occupation: Option<String>,
    pub profession: Option<String>,
    pub income: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub student_name: String,
    /// Generated `SCH-YYYY-NNNN`, globally unique, immutable after creation
    pub registration_no: String,
    pub admission_date: DateTime<Utc>,
    pub class_id: Uuid,
    pub fee_discount_percent: i32,
    pub mobile_number: String,
    pub picture: Option<String>,

    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    pub identification_mark: Option<String>,
    pub blood_group: Option<String>,
    pub disease: Option<String>,
    pub birth_form_id: Option<String>,
    pub caste: Option<String>,
    pub religion: Option<String>,
    pub previous_school: Option<String>,
    pub previous_school_id: Option<String>,
    pub additional_notes: Option<String>,
    pub orphan_student: bool,
    pub osc_status: bool,
    pub total_siblings: Option<i32>,
    pub address: Option<String>,

    pub father: Json<ParentInfo>,
    pub mother: Json<ParentInfo>,
    pub family_id: Option<Uuid>,

    pub is_active: bool,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Skeleton record with required fields; optional details are applied by
    /// the creation service from the validated payload.
    pub fn new(
        tenant_id: Uuid,
        student_name: String,
        registration_no: String,
        admission_date: DateTime<Utc>,
        class_id: Uuid,
        mobile_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_name,
            registration_no,
            admission_date,
            class_id,
            fee_discount_percent: 0,
            mobile_number,
            picture: None,
            date_of_birth: None,
            gender: None,
            identification_mark: None,
            blood_group: None,
            disease: None,
            birth_form_id: None,
            caste: None,
            religion: None,
            previous_school: None,
            previous_school_id: None,
            additional_notes: None,
            orphan_student: false,
            osc_status: false,
            total_siblings: None,
            address: None,
            father: Json(ParentInfo::default()),
            mother: Json(ParentInfo::default()),
            family_id: None,
            is_active: true,
            tenant_id,
            created_at: now,
            updated_at: now,
        }
    }
}
