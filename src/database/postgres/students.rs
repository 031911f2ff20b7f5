use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::translate;
use crate::database::models::Student;
use crate::database::store::{Page, StoreError, StudentFilter, StudentRepo};

pub struct PgStudentRepo {
    pool: PgPool,
}

impl PgStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(q: &str) -> String {
    format!("%{}%", q)
}

#[async_trait]
impl StudentRepo for PgStudentRepo {
    async fn insert(&self, student: &Student) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO students
                (id, student_name, registration_no, admission_date, class_id,
                 fee_discount_percent, mobile_number, picture, date_of_birth, gender,
                 identification_mark, blood_group, disease, birth_form_id, caste,
                 religion, previous_school, previous_school_id, additional_notes,
                 orphan_student, osc_status, total_siblings, address, father, mother,
                 family_id, is_active, tenant_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28,
                    $29, $30)
            "#,
        )
        .bind(student.id)
        .bind(&student.student_name)
        .bind(&student.registration_no)
        .bind(student.admission_date)
        .bind(student.class_id)
        .bind(student.fee_discount_percent)
        .bind(&student.mobile_number)
        .bind(&student.picture)
        .bind(student.date_of_birth)
        .bind(student.gender)
        .bind(&student.identification_mark)
        .bind(&student.blood_group)
        .bind(&student.disease)
        .bind(&student.birth_form_id)
        .bind(&student.caste)
        .bind(&student.religion)
        .bind(&student.previous_school)
        .bind(&student.previous_school_id)
        .bind(&student.additional_notes)
        .bind(student.orphan_student)
        .bind(student.osc_status)
        .bind(student.total_siblings)
        .bind(&student.address)
        .bind(&student.father)
        .bind(&student.mother)
        .bind(student.family_id)
        .bind(student.is_active)
        .bind(student.tenant_id)
        .bind(student.created_at)
        .bind(student.updated_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        include_inactive: bool,
    ) -> Result<Option<Student>, StoreError> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE tenant_id = $1 AND id = $2 AND ($3 OR is_active = TRUE)
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(include_inactive)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }

    async fn save(&self, student: &Student) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE students SET
                student_name = $1, admission_date = $2, class_id = $3,
                fee_discount_percent = $4, mobile_number = $5, picture = $6,
                date_of_birth = $7, gender = $8, identification_mark = $9,
                blood_group = $10, disease = $11, birth_form_id = $12, caste = $13,
                religion = $14, previous_school = $15, previous_school_id = $16,
                additional_notes = $17, orphan_student = $18, osc_status = $19,
                total_siblings = $20, address = $21, father = $22, mother = $23,
                family_id = $24, is_active = $25, updated_at = $26
            WHERE tenant_id = $27 AND id = $28
            "#,
        )
        .bind(&student.student_name)
        .bind(student.admission_date)
        .bind(student.class_id)
        .bind(student.fee_discount_percent)
        .bind(&student.mobile_number)
        .bind(&student.picture)
        .bind(student.date_of_birth)
        .bind(student.gender)
        .bind(&student.identification_mark)
        .bind(&student.blood_group)
        .bind(&student.disease)
        .bind(&student.birth_form_id)
        .bind(&student.caste)
        .bind(&student.religion)
        .bind(&student.previous_school)
        .bind(&student.previous_school_id)
        .bind(&student.additional_notes)
        .bind(student.orphan_student)
        .bind(student.osc_status)
        .bind(student.total_siblings)
        .bind(&student.address)
        .bind(&student.father)
        .bind(&student.mother)
        .bind(student.family_id)
        .bind(student.is_active)
        .bind(student.updated_at)
        .bind(student.tenant_id)
        .bind(student.id)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Student not found".into()));
        }
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &StudentFilter,
        page: &Page,
    ) -> Result<(Vec<Student>, i64), StoreError> {
        let pattern = filter.q.as_deref().map(like_pattern);

        let items_query = sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::uuid IS NULL OR class_id = $3)
              AND ($4::text IS NULL
                   OR student_name ILIKE $4
                   OR registration_no ILIKE $4
                   OR mobile_number ILIKE $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(filter.class_id)
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM students
            WHERE tenant_id = $1
              AND ($2 OR is_active = TRUE)
              AND ($3::uuid IS NULL OR class_id = $3)
              AND ($4::text IS NULL
                   OR student_name ILIKE $4
                   OR registration_no ILIKE $4
                   OR mobile_number ILIKE $4)
            "#,
        )
        .bind(tenant_id)
        .bind(filter.include_inactive)
        .bind(filter.class_id)
        .bind(&pattern)
        .fetch_one(&self.pool);

        let (items, total) = futures::try_join!(items_query, count_query).map_err(translate)?;
        Ok((items, total))
    }
}
