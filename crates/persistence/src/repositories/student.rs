//! Student repository.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::attendance::StudentRef;
use domain::models::student::{ListStudentsQuery, UpsertStudentRequest};
use shared::pagination::PageQuery;

use crate::entities::student::StudentEntity;

#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        request: &UpsertStudentRequest,
    ) -> Result<StudentEntity, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            r#"
            INSERT INTO students (madrasa_id, name, father_name, class_id, age, contact, admission_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(&request.name)
        .bind(&request.father_name)
        .bind(request.class_id)
        .bind(request.age)
        .bind(&request.contact)
        .bind(request.admission_date)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertStudentRequest,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET name = $3, father_name = $4, class_id = $5, age = $6, contact = $7,
                admission_date = $8, status = $9
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(&request.name)
        .bind(&request.father_name)
        .bind(request.class_id)
        .bind(request.age)
        .bind(&request.contact)
        .bind(request.admission_date)
        .bind(request.status.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            "SELECT * FROM students WHERE madrasa_id = $1 AND id = $2",
        )
        .bind(madrasa_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        query: &ListStudentsQuery,
        page: &PageQuery,
    ) -> Result<Vec<StudentEntity>, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT * FROM students
            WHERE madrasa_id = $1
              AND ($2::uuid IS NULL OR class_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY name
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(madrasa_id)
        .bind(query.class_id)
        .bind(query.status.map(|s| s.as_str()))
        .bind(page.per_page())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
    }

    /// Total matching students, for the pagination envelope.
    pub async fn count(
        &self,
        madrasa_id: Uuid,
        query: &ListStudentsQuery,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM students
            WHERE madrasa_id = $1
              AND ($2::uuid IS NULL OR class_id = $2)
              AND ($3::text IS NULL OR status = $3)
            "#,
        )
        .bind(madrasa_id)
        .bind(query.class_id)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Minimal (id, class_id) projection for the attendance engine.
    pub async fn list_refs(
        &self,
        madrasa_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<Vec<StudentRef>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
            r#"
            SELECT id, class_id FROM students
            WHERE madrasa_id = $1
              AND status = 'active'
              AND ($2::uuid IS NULL OR class_id = $2)
            ORDER BY name
            "#,
        )
        .bind(madrasa_id)
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, class_id)| StudentRef { id, class_id })
            .collect())
    }

    /// (id, name) pairs for register rows and export labels.
    pub async fn list_names(
        &self,
        madrasa_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<Vec<(Uuid, String)>, sqlx::Error> {
        sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT id, name FROM students
            WHERE madrasa_id = $1
              AND ($2::uuid IS NULL OR class_id = $2)
            ORDER BY name
            "#,
        )
        .bind(madrasa_id)
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete(&self, madrasa_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
