//! Income repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::finance::{LedgerFilter, UpsertIncomeRequest};

use crate::entities::income::IncomeEntity;

#[derive(Debug, Clone)]
pub struct IncomeRepository {
    pool: PgPool,
}

impl IncomeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        created_by: Uuid,
        request: &UpsertIncomeRequest,
    ) -> Result<IncomeEntity, sqlx::Error> {
        sqlx::query_as::<_, IncomeEntity>(
            r#"
            INSERT INTO income
                (madrasa_id, donor_name, donor_contact, amount, income_type, frequency,
                 date, receipt_number, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(&request.donor_name)
        .bind(&request.donor_contact)
        .bind(request.amount)
        .bind(&request.income_type)
        .bind(&request.frequency)
        .bind(request.date)
        .bind(&request.receipt_number)
        .bind(&request.notes)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertIncomeRequest,
    ) -> Result<Option<IncomeEntity>, sqlx::Error> {
        sqlx::query_as::<_, IncomeEntity>(
            r#"
            UPDATE income
            SET donor_name = $3, donor_contact = $4, amount = $5, income_type = $6,
                frequency = $7, date = $8, receipt_number = $9, notes = $10
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(&request.donor_name)
        .bind(&request.donor_contact)
        .bind(request.amount)
        .bind(&request.income_type)
        .bind(&request.frequency)
        .bind(request.date)
        .bind(&request.receipt_number)
        .bind(&request.notes)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        filter: &LedgerFilter,
    ) -> Result<Vec<IncomeEntity>, sqlx::Error> {
        sqlx::query_as::<_, IncomeEntity>(
            r#"
            SELECT * FROM income
            WHERE madrasa_id = $1
              AND ($2::text IS NULL OR income_type = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(madrasa_id)
        .bind(filter.type_filter())
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(&self.pool)
        .await
    }

    /// Sum of amounts in an optional date range, in minor units.
    pub async fn total(
        &self,
        madrasa_id: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM income
            WHERE madrasa_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(madrasa_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn delete(&self, madrasa_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM income WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
