//! Expense repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::finance::{LedgerFilter, UpsertExpenseRequest};

use crate::entities::expense::ExpenseEntity;

#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        created_by: Uuid,
        request: &UpsertExpenseRequest,
    ) -> Result<ExpenseEntity, sqlx::Error> {
        sqlx::query_as::<_, ExpenseEntity>(
            r#"
            INSERT INTO expenses
                (madrasa_id, expense_type, category, amount, date, recipient_name,
                 recipient_contact, description, receipt_number, payment_method, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(&request.expense_type)
        .bind(&request.category)
        .bind(request.amount)
        .bind(request.date)
        .bind(&request.recipient_name)
        .bind(&request.recipient_contact)
        .bind(&request.description)
        .bind(&request.receipt_number)
        .bind(&request.payment_method)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertExpenseRequest,
    ) -> Result<Option<ExpenseEntity>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseEntity>(
            r#"
            UPDATE expenses
            SET expense_type = $3, category = $4, amount = $5, date = $6,
                recipient_name = $7, recipient_contact = $8, description = $9,
                receipt_number = $10, payment_method = $11
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(&request.expense_type)
        .bind(&request.category)
        .bind(request.amount)
        .bind(request.date)
        .bind(&request.recipient_name)
        .bind(&request.recipient_contact)
        .bind(&request.description)
        .bind(&request.receipt_number)
        .bind(&request.payment_method)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        filter: &LedgerFilter,
    ) -> Result<Vec<ExpenseEntity>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseEntity>(
            r#"
            SELECT * FROM expenses
            WHERE madrasa_id = $1
              AND ($2::text IS NULL OR expense_type = $2)
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
            SELECT COALESCE(SUM(amount), 0) FROM expenses
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
        let result = sqlx::query("DELETE FROM expenses WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
