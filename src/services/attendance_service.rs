use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Attendance;
use crate::database::store::{Page, Paginated, Store};
use crate::error::ApiError;
use crate::types::AttendanceStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub struct AttendanceService {
    store: Store,
}

impl AttendanceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_student_exists(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), ApiError> {
        self.store
            .students
            .find(tenant_id, student_id, false)
            .await?
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("Student not found"))
    }

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
        request: CreateAttendanceRequest,
    ) -> Result<Attendance, ApiError> {
        let (student_id, class_id, date, status) = match (
            request.student_id,
            request.class_id,
            request.date,
            request.status,
        ) {
            (Some(student_id), Some(class_id), Some(date), Some(status)) => {
                (student_id, class_id, date, status)
            }
            _ => return Err(ApiError::bad_request("Missing required fields")),
        };

        self.ensure_student_exists(tenant_id, student_id).await?;
        self.ensure_class_exists(tenant_id, class_id).await?;

        let record = Attendance::new(tenant_id, student_id, class_id, date, status, request.remarks);
        self.store.attendance.insert(&record).await?;
        Ok(record)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: AttendanceListQuery,
    ) -> Result<Paginated<Attendance>, ApiError> {
        let page = Page::clamped(query.page, query.limit);
        let (items, total) = self.store.attendance.list(tenant_id, &page).await?;
        Ok(Paginated::new(items, &page, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Attendance, ApiError> {
        self.store
            .attendance
            .find(tenant_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Attendance not found"))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        request: UpdateAttendanceRequest,
    ) -> Result<Attendance, ApiError> {
        let mut record = self.get(tenant_id, id).await?;

        if let Some(student_id) = request.student_id {
            if student_id != record.student_id {
                self.ensure_student_exists(tenant_id, student_id).await?;
            }
            record.student_id = student_id;
        }
        if let Some(class_id) = request.class_id {
            if class_id != record.class_id {
                self.ensure_class_exists(tenant_id, class_id).await?;
            }
            record.class_id = class_id;
        }
        if let Some(date) = request.date {
            record.date = date;
        }
        if let Some(status) = request.status {
            record.status = status;
        }
        if let Some(remarks) = request.remarks {
            record.remarks = Some(remarks);
        }
        record.updated_at = Utc::now();

        self.store.attendance.save(&record).await?;
        Ok(record)
    }

    /// Physical delete; attendance records carry no soft-delete flag
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Attendance, ApiError> {
        self.store
            .attendance
            .delete(tenant_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Attendance not found"))
    }
}
