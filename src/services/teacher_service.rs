use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Teacher;
use crate::database::store::{Page, Paginated, Store, TeacherFilter};
use crate::error::ApiError;
use crate::services::sequence::SequenceService;
use crate::types::{Gender, StaffRole, StaffStatus};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetails {
    pub picture: Option<String>,
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
    pub status: Option<StaffStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherRequest {
    pub employee_name: Option<String>,
    pub mobile_number: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub role: Option<StaffRole>,
    pub monthly_salary: Option<Decimal>,
    #[serde(flatten)]
    pub details: TeacherDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherRequest {
    pub employee_name: Option<String>,
    pub mobile_number: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub role: Option<StaffRole>,
    pub monthly_salary: Option<Decimal>,
    /// Immutable; any attempt to set it is rejected
    pub employee_id: Option<String>,
    #[serde(flatten)]
    pub details: TeacherDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub include_inactive: Option<bool>,
    pub role: Option<StaffRole>,
    pub status: Option<StaffStatus>,
    pub q: Option<String>,
}

impl TeacherListQuery {
    fn filter(&self) -> TeacherFilter {
        TeacherFilter {
            include_inactive: self.include_inactive.unwrap_or(false),
            role: self.role,
            status: self.status,
            q: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
        }
    }

    fn page(&self) -> Page {
        Page::clamped(self.page, self.limit)
    }
}

fn apply_details(teacher: &mut Teacher, details: TeacherDetails) -> Result<(), ApiError> {
    if let Some(experience) = details.experience {
        if experience < 0 {
            return Err(ApiError::bad_request(
                "experience must be a non-negative number",
            ));
        }
        teacher.experience = Some(experience);
    }
    if let Some(email) = details.email {
        teacher.email = Some(email.trim().to_lowercase());
    }

    if let Some(v) = details.picture {
        teacher.picture = Some(v);
    }
    if let Some(v) = details.father_or_husband_name {
        teacher.father_or_husband_name = Some(v);
    }
    if let Some(v) = details.national_id {
        teacher.national_id = Some(v);
    }
    if let Some(v) = details.education {
        teacher.education = Some(v);
    }
    if let Some(v) = details.gender {
        teacher.gender = Some(v);
    }
    if let Some(v) = details.religion {
        teacher.religion = Some(v);
    }
    if let Some(v) = details.blood_group {
        teacher.blood_group = Some(v);
    }
    if let Some(v) = details.date_of_birth {
        teacher.date_of_birth = Some(v);
    }
    if let Some(v) = details.address {
        teacher.address = Some(v);
    }
    if let Some(v) = details.status {
        teacher.status = v;
    }
    Ok(())
}

pub struct TeacherService {
    store: Store,
    sequences: SequenceService,
}

impl TeacherService {
    pub fn new(store: Store) -> Self {
        let sequences = SequenceService::new(&store);
        Self { store, sequences }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        request: CreateTeacherRequest,
    ) -> Result<Teacher, ApiError> {
        let employee_name = request
            .employee_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("employeeName is required"))?
            .to_string();
        let mobile_number = request
            .mobile_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("mobileNumber is required"))?
            .to_string();
        let joining_date = request
            .joining_date
            .ok_or_else(|| ApiError::bad_request("joiningDate is required"))?;
        let role = request
            .role
            .ok_or_else(|| ApiError::bad_request("role is required"))?;
        let monthly_salary = request
            .monthly_salary
            .ok_or_else(|| ApiError::bad_request("monthlySalary is required"))?;
        if monthly_salary < Decimal::ZERO {
            return Err(ApiError::bad_request(
                "monthlySalary must be a non-negative number",
            ));
        }

        let employee_id = self.sequences.employee_id().await?;
        let mut teacher = Teacher::new(
            tenant_id,
            employee_name,
            employee_id,
            mobile_number,
            joining_date,
            role,
            monthly_salary,
        );
        apply_details(&mut teacher, request.details)?;

        self.store.teachers.insert(&teacher).await?;
        Ok(teacher)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: TeacherListQuery,
    ) -> Result<Paginated<Teacher>, ApiError> {
        let page = query.page();
        let (items, total) = self
            .store
            .teachers
            .list(tenant_id, &query.filter(), &page)
            .await?;
        Ok(Paginated::new(items, &page, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Teacher, ApiError> {
        self.store
            .teachers
            .find(tenant_id, id, false)
            .await?
            .ok_or_else(|| ApiError::not_found("Teacher not found"))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        request: UpdateTeacherRequest,
    ) -> Result<Teacher, ApiError> {
        if request.employee_id.is_some() {
            return Err(ApiError::bad_request("employeeId cannot be updated"));
        }

        let mut teacher = self.get(tenant_id, id).await?;

        if let Some(name) = request.employee_name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiError::bad_request("employeeName must not be empty"));
            }
            teacher.employee_name = name;
        }
        if let Some(mobile) = request.mobile_number {
            let mobile = mobile.trim().to_string();
            if mobile.is_empty() {
                return Err(ApiError::bad_request("mobileNumber must not be empty"));
            }
            teacher.mobile_number = mobile;
        }
        if let Some(date) = request.joining_date {
            teacher.joining_date = date;
        }
        if let Some(role) = request.role {
            teacher.role = role;
        }
        if let Some(salary) = request.monthly_salary {
            if salary < Decimal::ZERO {
                return Err(ApiError::bad_request(
                    "monthlySalary must be a non-negative number",
                ));
            }
            teacher.monthly_salary = salary;
        }
        apply_details(&mut teacher, request.details)?;
        teacher.updated_at = Utc::now();

        self.store.teachers.save(&teacher).await?;
        Ok(teacher)
    }

    /// Soft delete: deactivates the record and marks the staff status
    /// Inactive in the same write
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Teacher, ApiError> {
        let mut teacher = self.get(tenant_id, id).await?;
        teacher.is_active = false;
        teacher.status = StaffStatus::Inactive;
        teacher.updated_at = Utc::now();
        self.store.teachers.save(&teacher).await?;
        Ok(teacher)
    }

    pub async fn search(
        &self,
        tenant_id: Uuid,
        query: TeacherListQuery,
    ) -> Result<Paginated<Teacher>, ApiError> {
        let has_query = query.q.as_deref().map_or(false, |q| !q.trim().is_empty());
        if !has_query {
            return Err(ApiError::bad_request("q is required"));
        }
        self.list(tenant_id, query).await
    }

    pub async fn by_role(
        &self,
        tenant_id: Uuid,
        role: &str,
        query: TeacherListQuery,
    ) -> Result<Paginated<Teacher>, ApiError> {
        let role = StaffRole::parse(role)
            .ok_or_else(|| ApiError::bad_request("Invalid staff role"))?;
        self.list(
            tenant_id,
            TeacherListQuery {
                role: Some(role),
                ..query
            },
        )
        .await
    }
}
