//! Expense entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::finance::ExpenseResponse;

/// Database row mapping for the expenses table. Amounts are minor units.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub expense_type: String,
    pub category: Option<String>,
    pub amount: i64,
    pub date: NaiveDate,
    pub recipient_name: String,
    pub recipient_contact: Option<String>,
    pub description: Option<String>,
    pub receipt_number: Option<String>,
    pub payment_method: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ExpenseEntity {
    pub fn into_response(self) -> ExpenseResponse {
        ExpenseResponse {
            id: self.id,
            expense_type: self.expense_type,
            category: self.category,
            amount: self.amount,
            date: self.date,
            recipient_name: self.recipient_name,
            recipient_contact: self.recipient_contact,
            description: self.description,
            receipt_number: self.receipt_number,
            payment_method: self.payment_method,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}
