//! Income entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::finance::IncomeResponse;

/// Database row mapping for the income table. Amounts are minor units.
#[derive(Debug, Clone, FromRow)]
pub struct IncomeEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub donor_name: String,
    pub donor_contact: Option<String>,
    pub amount: i64,
    pub income_type: String,
    pub frequency: String,
    pub date: NaiveDate,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl IncomeEntity {
    pub fn into_response(self) -> IncomeResponse {
        IncomeResponse {
            id: self.id,
            donor_name: self.donor_name,
            donor_contact: self.donor_contact,
            amount: self.amount,
            income_type: self.income_type,
            frequency: self.frequency,
            date: self.date,
            receipt_number: self.receipt_number,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}
