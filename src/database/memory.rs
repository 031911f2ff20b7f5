//! In-memory store fake.
//!
//! Backs the test suite so the full request pipeline can be exercised
//! without PostgreSQL. Mirrors the production store's observable behavior,
//! including compound uniqueness and atomic counters. Not wired into `main`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Attendance, AuthSession, Class, Student, Teacher, Tenant, User};
use crate::database::store::{
    AttendanceRepo, ClassFilter, ClassRepo, CounterRepo, HealthProbe, Page, SessionRepo, Store,
    StoreError, StudentFilter, StudentRepo, TeacherFilter, TeacherRepo, TenantRepo, UserRepo,
};

pub fn store() -> Store {
    let mem = Arc::new(MemoryStore::default());
    Store {
        tenants: mem.clone(),
        users: mem.clone(),
        students: mem.clone(),
        teachers: mem.clone(),
        classes: mem.clone(),
        attendance: mem.clone(),
        sessions: mem.clone(),
        counters: mem.clone(),
        probe: mem,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tenants: RwLock<Vec<Tenant>>,
    users: RwLock<Vec<User>>,
    students: RwLock<Vec<Student>>,
    teachers: RwLock<Vec<Teacher>>,
    classes: RwLock<Vec<Class>>,
    attendance: RwLock<Vec<Attendance>>,
    sessions: RwLock<Vec<AuthSession>>,
    counters: Mutex<HashMap<String, i64>>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(items: Vec<T>, page: &Page) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page_items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    (page_items, total)
}

#[async_trait]
impl TenantRepo for MemoryStore {
    async fn insert(&self, tenant: &Tenant) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().await;
        if tenants.iter().any(|t| t.slug == tenant.slug) {
            return Err(StoreError::Duplicate("slug".into()));
        }
        tenants.push(tenant.clone());
        Ok(())
    }

    async fn set_owner(&self, id: Uuid, owner_user_id: Uuid) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().await;
        let tenant = tenants
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound("Tenant not found".into()))?;
        tenant.owner_user_id = Some(owner_user_id);
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        let tenants = self.tenants.read().await;
        Ok(tenants.iter().find(|t| t.slug == slug).cloned())
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.tenant_id == user.tenant_id && u.email == user.email)
        {
            return Err(StoreError::Duplicate("email".into()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email_any_tenant(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.email == email)
            .cloned())
    }

    async fn list(&self, tenant_id: Uuid) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StudentRepo for MemoryStore {
    async fn insert(&self, student: &Student) -> Result<(), StoreError> {
        let mut students = self.students.write().await;
        // registration numbers are globally unique, across tenants
        if students
            .iter()
            .any(|s| s.registration_no == student.registration_no)
        {
            return Err(StoreError::Duplicate("registrationNo".into()));
        }
        students.push(student.clone());
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students
            .iter()
            .find(|s| s.tenant_id == tenant_id && s.id == id && (include_inactive || s.is_active))
            .cloned())
    }

    async fn save(&self, student: &Student) -> Result<(), StoreError> {
        let mut students = self.students.write().await;
        let existing = students
            .iter_mut()
            .find(|s| s.tenant_id == student.tenant_id && s.id == student.id)
            .ok_or_else(|| StoreError::NotFound("Student not found".into()))?;
        *existing = student.clone();
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &StudentFilter,
        page: &Page,
    ) -> Result<(Vec<Student>, i64), StoreError> {
        let students = self.students.read().await;
        let mut matched: Vec<Student> = students
            .iter()
            .filter(|s| s.tenant_id == tenant_id)
            .filter(|s| filter.include_inactive || s.is_active)
            .filter(|s| filter.class_id.map_or(true, |c| s.class_id == c))
            .filter(|s| {
                filter.q.as_deref().map_or(true, |q| {
                    contains_ci(&s.student_name, q)
                        || contains_ci(&s.registration_no, q)
                        || contains_ci(&s.mobile_number, q)
                })
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, page))
    }
}

#[async_trait]
impl TeacherRepo for MemoryStore {
    async fn insert(&self, teacher: &Teacher) -> Result<(), StoreError> {
        let mut teachers = self.teachers.write().await;
        if teachers.iter().any(|t| t.employee_id == teacher.employee_id) {
            return Err(StoreError::Duplicate("employeeId".into()));
        }
        if let Some(email) = &teacher.email {
            if teachers
                .iter()
                .any(|t| t.tenant_id == teacher.tenant_id && t.email.as_deref() == Some(email))
            {
                return Err(StoreError::Duplicate("email".into()));
            }
        }
        teachers.push(teacher.clone());
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Teacher>, StoreError> {
        let teachers = self.teachers.read().await;
        Ok(teachers
            .iter()
            .find(|t| t.tenant_id == tenant_id && t.id == id && (include_inactive || t.is_active))
            .cloned())
    }

    async fn save(&self, teacher: &Teacher) -> Result<(), StoreError> {
        let mut teachers = self.teachers.write().await;
        if let Some(email) = &teacher.email {
            if teachers.iter().any(|t| {
                t.tenant_id == teacher.tenant_id
                    && t.id != teacher.id
                    && t.email.as_deref() == Some(email)
            }) {
                return Err(StoreError::Duplicate("email".into()));
            }
        }
        let existing = teachers
            .iter_mut()
            .find(|t| t.tenant_id == teacher.tenant_id && t.id == teacher.id)
            .ok_or_else(|| StoreError::NotFound("Teacher not found".into()))?;
        *existing = teacher.clone();
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &TeacherFilter,
        page: &Page,
    ) -> Result<(Vec<Teacher>, i64), StoreError> {
        let teachers = self.teachers.read().await;
        let mut matched: Vec<Teacher> = teachers
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .filter(|t| filter.include_inactive || t.is_active)
            .filter(|t| filter.role.map_or(true, |r| t.role == r))
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| {
                filter.q.as_deref().map_or(true, |q| {
                    contains_ci(&t.employee_name, q)
                        || contains_ci(&t.employee_id, q)
                        || contains_ci(&t.mobile_number, q)
                        || t.email.as_deref().map_or(false, |e| contains_ci(e, q))
                })
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, page))
    }
}

#[async_trait]
impl ClassRepo for MemoryStore {
    async fn insert(&self, class: &Class) -> Result<(), StoreError> {
        let mut classes = self.classes.write().await;
        if classes
            .iter()
            .any(|c| c.tenant_id == class.tenant_id && c.class_name == class.class_name)
        {
            return Err(StoreError::Duplicate("className".into()));
        }
        if let Some(code) = &class.class_code {
            if classes
                .iter()
                .any(|c| c.tenant_id == class.tenant_id && c.class_code.as_deref() == Some(code))
            {
                return Err(StoreError::Duplicate("classCode".into()));
            }
        }
        classes.push(class.clone());
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Class>, StoreError> {
        let classes = self.classes.read().await;
        Ok(classes
            .iter()
            .find(|c| c.tenant_id == tenant_id && c.id == id && (include_inactive || c.is_active))
            .cloned())
    }

    async fn save(&self, class: &Class) -> Result<(), StoreError> {
        let mut classes = self.classes.write().await;
        if classes.iter().any(|c| {
            c.tenant_id == class.tenant_id && c.id != class.id && c.class_name == class.class_name
        }) {
            return Err(StoreError::Duplicate("className".into()));
        }
        let existing = classes
            .iter_mut()
            .find(|c| c.tenant_id == class.tenant_id && c.id == class.id)
            .ok_or_else(|| StoreError::NotFound("Class not found".into()))?;
        *existing = class.clone();
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &ClassFilter,
        page: &Page,
    ) -> Result<(Vec<Class>, i64), StoreError> {
        let classes = self.classes.read().await;
        let mut matched: Vec<Class> = classes
            .iter()
            .filter(|c| c.tenant_id == tenant_id)
            .filter(|c| filter.include_inactive || c.is_active)
            .filter(|c| {
                filter
                    .academic_year
                    .as_deref()
                    .map_or(true, |y| c.academic_year.as_deref() == Some(y))
            })
            .filter(|c| filter.class_teacher.map_or(true, |t| c.class_teacher == t))
            .filter(|c| {
                filter
                    .q
                    .as_deref()
                    .map_or(true, |q| contains_ci(&c.class_name, q))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, page))
    }
}

#[async_trait]
impl AttendanceRepo for MemoryStore {
    async fn insert(&self, record: &Attendance) -> Result<(), StoreError> {
        let mut attendance = self.attendance.write().await;
        if attendance.iter().any(|a| {
            a.tenant_id == record.tenant_id
                && a.student_id == record.student_id
                && a.date == record.date
        }) {
            return Err(StoreError::Duplicate("attendance".into()));
        }
        attendance.push(record.clone());
        Ok(())
    }

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError> {
        let attendance = self.attendance.read().await;
        Ok(attendance
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.id == id)
            .cloned())
    }

    async fn save(&self, record: &Attendance) -> Result<(), StoreError> {
        let mut attendance = self.attendance.write().await;
        let existing = attendance
            .iter_mut()
            .find(|a| a.tenant_id == record.tenant_id && a.id == record.id)
            .ok_or_else(|| StoreError::NotFound("Attendance not found".into()))?;
        *existing = record.clone();
        Ok(())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendance>, StoreError> {
        let mut attendance = self.attendance.write().await;
        let index = attendance
            .iter()
            .position(|a| a.tenant_id == tenant_id && a.id == id);
        Ok(index.map(|i| attendance.remove(i)))
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<Attendance>, i64), StoreError> {
        let attendance = self.attendance.read().await;
        let mut matched: Vec<Attendance> = attendance
            .iter()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matched, page))
    }
}

#[async_trait]
impl SessionRepo for MemoryStore {
    async fn insert(&self, session: &AuthSession) -> Result<(), StoreError> {
        self.sessions.write().await.push(session.clone());
        Ok(())
    }
}

#[async_trait]
impl CounterRepo for MemoryStore {
    async fn next(&self, key: &str) -> Result<i64, StoreError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| StoreError::Unavailable("counter lock poisoned".into()))?;
        let seq = counters.entry(key.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Tenant;

    #[tokio::test]
    async fn counter_is_atomic_under_concurrency() {
        let store = store();
        let mut handles = Vec::new();
        for _ in 0..32 {
            let counters = store.counters.clone();
            handles.push(tokio::spawn(
                async move { counters.next("seq-test").await },
            ));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap().unwrap());
        }
        seen.sort_unstable();
        let expected: Vec<i64> = (1..=32).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn slug_uniqueness_is_enforced() {
        let store = store();
        let first = Tenant::new("Greenwood".into(), "greenwood".into());
        let second = Tenant::new("Greenwood Two".into(), "greenwood".into());
        store.tenants.insert(&first).await.unwrap();
        let err = store.tenants.insert(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(field) if field == "slug"));
    }

    #[tokio::test]
    async fn pagination_slices_and_counts() {
        let page = Page { page: 2, limit: 2 };
        let (items, total) = paginate(vec![1, 2, 3, 4, 5], &page);
        assert_eq!(items, vec![3, 4]);
        assert_eq!(total, 5);

        let past_end = Page { page: 9, limit: 2 };
        let (items, total) = paginate(vec![1, 2, 3], &past_end);
        assert!(items.is_empty());
        assert_eq!(total, 3);
    }
}
