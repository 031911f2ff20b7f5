use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Class;
use crate::database::store::{ClassFilter, Page, Paginated, Store};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub class_name: Option<String>,
    pub monthly_tuition_fee: Option<Decimal>,
    pub class_teacher: Option<Uuid>,
    pub class_code: Option<String>,
    pub description: Option<String>,
    pub academic_year: Option<String>,
    pub max_students: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub monthly_tuition_fee: Option<Decimal>,
    pub class_teacher: Option<Uuid>,
    pub class_code: Option<String>,
    pub description: Option<String>,
    pub academic_year: Option<String>,
    pub max_students: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub include_inactive: Option<bool>,
    pub academic_year: Option<String>,
    pub class_teacher: Option<Uuid>,
    pub q: Option<String>,
}

impl ClassListQuery {
    fn filter(&self) -> ClassFilter {
        ClassFilter {
            include_inactive: self.include_inactive.unwrap_or(false),
            academic_year: self
                .academic_year
                .as_deref()
                .map(str::trim)
                .filter(|y| !y.is_empty())
                .map(String::from),
            class_teacher: self.class_teacher,
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

pub struct ClassService {
    store: Store,
}

impl ClassService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Tenant-scoped referential check: the class teacher must exist, be
    /// active and belong to the caller's tenant
    async fn ensure_teacher_exists(
        &self,
        tenant_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), ApiError> {
        self.store
            .teachers
            .find(tenant_id, teacher_id, false)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("Class teacher not found"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        request: CreateClassRequest,
    ) -> Result<Class, ApiError> {
        let class_name = request
            .class_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("className is required"))?
            .to_string();
        let monthly_tuition_fee = request
            .monthly_tuition_fee
            .ok_or_else(|| ApiError::bad_request("monthlyTuitionFee is required"))?;
        if monthly_tuition_fee < Decimal::ZERO {
            return Err(ApiError::bad_request(
                "monthlyTuitionFee must be a non-negative number",
            ));
        }
        let class_teacher = request
            .class_teacher
            .ok_or_else(|| ApiError::bad_request("classTeacher is required"))?;
        if let Some(max) = request.max_students {
            if max < 0 {
                return Err(ApiError::bad_request(
                    "maxStudents must be a non-negative number",
                ));
            }
        }

        self.ensure_teacher_exists(tenant_id, class_teacher).await?;

        let mut class = Class::new(tenant_id, class_name, monthly_tuition_fee, class_teacher);
        class.class_code = request.class_code;
        class.description = request.description;
        class.academic_year = request.academic_year;
        class.max_students = request.max_students;

        self.store.classes.insert(&class).await?;
        Ok(class)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: ClassListQuery,
    ) -> Result<Paginated<Class>, ApiError> {
        let page = query.page();
        let (items, total) = self
            .store
            .classes
            .list(tenant_id, &query.filter(), &page)
            .await?;
        Ok(Paginated::new(items, &page, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Class, ApiError> {
        self.store
            .classes
            .find(tenant_id, id, false)
            .await?
            .ok_or_else(|| ApiError::not_found("Class not found"))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        request: UpdateClassRequest,
    ) -> Result<Class, ApiError> {
        let mut class = self.get(tenant_id, id).await?;

        if let Some(teacher_id) = request.class_teacher {
            if teacher_id != class.class_teacher {
                self.ensure_teacher_exists(tenant_id, teacher_id).await?;
            }
            class.class_teacher = teacher_id;
        }
        if let Some(name) = request.class_name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiError::bad_request("className must not be empty"));
            }
            class.class_name = name;
        }
        if let Some(fee) = request.monthly_tuition_fee {
            if fee < Decimal::ZERO {
                return Err(ApiError::bad_request(
                    "monthlyTuitionFee must be a non-negative number",
                ));
            }
            class.monthly_tuition_fee = fee;
        }
        if let Some(code) = request.class_code {
            class.class_code = Some(code);
        }
        if let Some(description) = request.description {
            class.description = Some(description);
        }
        if let Some(year) = request.academic_year {
            class.academic_year = Some(year);
        }
        if let Some(max) = request.max_students {
            if max < 0 {
                return Err(ApiError::bad_request(
                    "maxStudents must be a non-negative number",
                ));
            }
            class.max_students = Some(max);
        }
        class.updated_at = Utc::now();

        self.store.classes.save(&class).await?;
        Ok(class)
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Class, ApiError> {
        let mut class = self.get(tenant_id, id).await?;
        class.is_active = false;
        class.updated_at = Utc::now();
        self.store.classes.save(&class).await?;
        Ok(class)
    }

    pub async fn by_teacher(
        &self,
        tenant_id: Uuid,
        teacher_id: Uuid,
        query: ClassListQuery,
    ) -> Result<Paginated<Class>, ApiError> {
        self.ensure_teacher_exists(tenant_id, teacher_id).await?;
        self.list(
            tenant_id,
            ClassListQuery {
                class_teacher: Some(teacher_id),
                ..query
            },
        )
        .await
    }
}
