//! Fee repository.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::finance::UpsertFeeRequest;

use crate::entities::fee::FeeEntity;

#[derive(Debug, Clone)]
pub struct FeeRepository {
    pool: PgPool,
}

impl FeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        request: &UpsertFeeRequest,
    ) -> Result<FeeEntity, sqlx::Error> {
        sqlx::query_as::<_, FeeEntity>(
            r#"
            INSERT INTO fees (madrasa_id, student_id, fee_type, academic_year, amount, due_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(request.student_id)
        .bind(&request.fee_type)
        .bind(&request.academic_year)
        .bind(request.amount)
        .bind(request.due_date)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertFeeRequest,
    ) -> Result<Option<FeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeeEntity>(
            r#"
            UPDATE fees
            SET student_id = $3, fee_type = $4, academic_year = $5, amount = $6,
                due_date = $7, status = $8
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(request.student_id)
        .bind(&request.fee_type)
        .bind(&request.academic_year)
        .bind(request.amount)
        .bind(request.due_date)
        .bind(request.status.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        student_id: Option<Uuid>,
    ) -> Result<Vec<FeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeeEntity>(
            r#"
            SELECT * FROM fees
            WHERE madrasa_id = $1
              AND ($2::uuid IS NULL OR student_id = $2)
            ORDER BY due_date DESC
            "#,
        )
        .bind(madrasa_id)
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete(&self, madrasa_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
