//! Education report repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::education::{ListEducationReportsQuery, UpsertEducationReportRequest};

use crate::entities::education_report::EducationReportEntity;

#[derive(Debug, Clone)]
pub struct EducationReportRepository {
    pool: PgPool,
}

impl EducationReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        student_id: Uuid,
        request: &UpsertEducationReportRequest,
    ) -> Result<EducationReportEntity, sqlx::Error> {
        sqlx::query_as::<_, EducationReportEntity>(
            r#"
            INSERT INTO education_reports
                (madrasa_id, student_id, date, sabak_para_no, sabqi_recited, sabqi_amount, manzil_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(student_id)
        .bind(request.date)
        .bind(request.sabak_para_no)
        .bind(request.sabqi_recited)
        .bind(&request.sabqi_amount)
        .bind(request.manzil_number)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertEducationReportRequest,
    ) -> Result<Option<EducationReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, EducationReportEntity>(
            r#"
            UPDATE education_reports
            SET date = $3, sabak_para_no = $4, sabqi_recited = $5, sabqi_amount = $6,
                manzil_number = $7
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(request.date)
        .bind(request.sabak_para_no)
        .bind(request.sabqi_recited)
        .bind(&request.sabqi_amount)
        .bind(request.manzil_number)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        query: &ListEducationReportsQuery,
    ) -> Result<Vec<EducationReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, EducationReportEntity>(
            r#"
            SELECT * FROM education_reports
            WHERE madrasa_id = $1
              AND ($2::uuid IS NULL OR student_id = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date, student_id
            "#,
        )
        .bind(madrasa_id)
        .bind(query.student_id)
        .bind(query.date_from)
        .bind(query.date_to)
        .fetch_all(&self.pool)
        .await
    }

    /// Entries inside a month window for the education register export.
    pub async fn range_records(
        &self,
        madrasa_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EducationReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, EducationReportEntity>(
            r#"
            SELECT * FROM education_reports
            WHERE madrasa_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date, student_id
            "#,
        )
        .bind(madrasa_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete(&self, madrasa_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM education_reports WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
