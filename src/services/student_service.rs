use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::models::{ParentInfo, Student};
use crate::database::store::{Page, Paginated, Store, StudentFilter};
use crate::error::ApiError;
use crate::services::sequence::SequenceService;
use crate::types::Gender;

/// Optional descriptive fields shared by the create and update payloads
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub fee_discount_percent: Option<i32>,
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
    pub orphan_student: Option<bool>,
    pub osc_status: Option<bool>,
    pub total_siblings: Option<i32>,
    pub address: Option<String>,
    pub father: Option<ParentInfo>,
    pub mother: Option<ParentInfo>,
    pub family_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub student_name: Option<String>,
    pub mobile_number: Option<String>,
    pub class_id: Option<Uuid>,
    pub admission_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub details: StudentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub student_name: Option<String>,
    pub mobile_number: Option<String>,
    pub class_id: Option<Uuid>,
    pub admission_date: Option<DateTime<Utc>>,
    /// Immutable; any attempt to set it is rejected
    pub registration_no: Option<String>,
    #[serde(flatten)]
    pub details: StudentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub include_inactive: Option<bool>,
    pub class_id: Option<Uuid>,
    pub q: Option<String>,
}

impl StudentListQuery {
    fn filter(&self) -> StudentFilter {
        StudentFilter {
            include_inactive: self.include_inactive.unwrap_or(false),
            class_id: self.class_id,
            q: self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()).map(String::from),
        }
    }

    fn page(&self) -> Page {
        Page::clamped(self.page, self.limit)
    }
}

fn apply_details(student: &mut Student, details: StudentDetails) -> Result<(), ApiError> {
    if let Some(pct) = details.fee_discount_percent {
        if !(0..=100).contains(&pct) {
            return Err(ApiError::bad_request(
                "feeDiscountPercent must be between 0 and 100",
            ));
        }
        student.fee_discount_percent = pct;
    }
    if let Some(siblings) = details.total_siblings {
        if siblings < 0 {
            return Err(ApiError::bad_request(
                "totalSiblings must be a non-negative number",
            ));
        }
        student.total_siblings = Some(siblings);
    }

    if let Some(v) = details.picture {
        student.picture = Some(v);
    }
    if let Some(v) = details.date_of_birth {
        student.date_of_birth = Some(v);
    }
    if let Some(v) = details.gender {
        student.gender = Some(v);
    }
    if let Some(v) = details.identification_mark {
        student.identification_mark = Some(v);
    }
    if let Some(v) = details.blood_group {
        student.blood_group = Some(v);
    }
    if let Some(v) = details.disease {
        student.disease = Some(v);
    }
    if let Some(v) = details.birth_form_id {
        student.birth_form_id = Some(v);
    }
    if let Some(v) = details.caste {
        student.caste = Some(v);
    }
    if let Some(v) = details.religion {
        student.religion = Some(v);
    }
    if let Some(v) = details.previous_school {
        student.previous_school = Some(v);
    }
    if let Some(v) = details.previous_school_id {
        student.previous_school_id = Some(v);
    }
    if let Some(v) = details.additional_notes {
        student.additional_notes = Some(v);
    }
    if let Some(v) = details.orphan_student {
        student.orphan_student = v;
    }
    if let Some(v) = details.osc_status {
        student.osc_status = v;
    }
    if let Some(v) = details.address {
        student.address = Some(v);
    }
    if let Some(v) = details.father {
        student.father = Json(v);
    }
    if let Some(v) = details.mother {
        student.mother = Json(v);
    }
    if let Some(v) = details.family_id {
        student.family_id = Some(v);
    }
    Ok(())
}

pub struct StudentService {
    store: Store,
    sequences: SequenceService,
}

impl StudentService {
    pub fn new(store: Store) -> Self {
        let sequences = SequenceService::new(&store);
        Self { store, sequences }
    }

    /// Tenant-scoped referential check: the class must exist, be active and
    /// belong to the caller's tenant
    async fn ensure_class_exists(&self, tenant_id: Uuid, class_id: Uuid) -> Result<(), ApiError> {
        self.store
            .classes
            .find(tenant_id, class_id, false)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("Class not found"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        request: CreateStudentRequest,
    ) -> Result<Student, ApiError> {
        let student_name = request
            .student_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("studentName is required"))?
            .to_string();
        let mobile_number = request
            .mobile_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("mobileNumber is required"))?
            .to_string();
        let class_id = request
            .class_id
            .ok_or_else(|| ApiError::bad_request("classId is required"))?;
        let admission_date = request
            .admission_date
            .ok_or_else(|| ApiError::bad_request("admissionDate is required"))?;

        self.ensure_class_exists(tenant_id, class_id).await?;

        let registration_no = self.sequences.registration_no().await?;
        let mut student = Student::new(
            tenant_id,
            student_name,
            registration_no,
            admission_date,
            class_id,
            mobile_number,
        );
        apply_details(&mut student, request.details)?;

        self.store.students.insert(&student).await?;
        Ok(student)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: StudentListQuery,
    ) -> Result<Paginated<Student>, ApiError> {
        let page = query.page();
        let (items, total) = self
            .store
            .students
            .list(tenant_id, &query.filter(), &page)
            .await?;
        Ok(Paginated::new(items, &page, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Student, ApiError> {
        self.store
            .students
            .find(tenant_id, id, false)
            .await?
            .ok_or_else(|| ApiError::not_found("Student not found"))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        request: UpdateStudentRequest,
    ) -> Result<Student, ApiError> {
        if request.registration_no.is_some() {
            return Err(ApiError::bad_request("registrationNo cannot be updated"));
        }

        let mut student = self.get(tenant_id, id).await?;

        if let Some(class_id) = request.class_id {
            if class_id != student.class_id {
                self.ensure_class_exists(tenant_id, class_id).await?;
            }
            student.class_id = class_id;
        }
        if let Some(name) = request.student_name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiError::bad_request("studentName must not be empty"));
            }
            student.student_name = name;
        }
        if let Some(mobile) = request.mobile_number {
            let mobile = mobile.trim().to_string();
            if mobile.is_empty() {
                return Err(ApiError::bad_request("mobileNumber must not be empty"));
            }
            student.mobile_number = mobile;
        }
        if let Some(date) = request.admission_date {
            student.admission_date = date;
        }
        apply_details(&mut student, request.details)?;
        student.updated_at = Utc::now();

        self.store.students.save(&student).await?;
        Ok(student)
    }

    /// Soft delete: flips `is_active`, the record stays queryable with
    /// `includeInactive=true`
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Student, ApiError> {
        let mut student = self.get(tenant_id, id).await?;
        student.is_active = false;
        student.updated_at = Utc::now();
        self.store.students.save(&student).await?;
        Ok(student)
    }

    pub async fn by_class(
        &self,
        tenant_id: Uuid,
        class_id: Uuid,
        query: StudentListQuery,
    ) -> Result<Paginated<Student>, ApiError> {
        self.ensure_class_exists(tenant_id, class_id).await?;
        self.list(
            tenant_id,
            StudentListQuery {
                class_id: Some(class_id),
                ..query
            },
        )
        .await
    }

    pub async fn search(
        &self,
        tenant_id: Uuid,
        query: StudentListQuery,
    ) -> Result<Paginated<Student>, ApiError> {
        let has_query = query.q.as_deref().map_or(false, |q| !q.trim().is_empty());
        if !has_query {
            return Err(ApiError::bad_request("q is required"));
        }
        self.list(tenant_id, query).await
    }
}
