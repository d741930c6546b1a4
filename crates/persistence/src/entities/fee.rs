//! Fee entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::finance::{FeeResponse, FeeStatus};

use super::decode_enum;

/// Database row mapping for the fees table.
#[derive(Debug, Clone, FromRow)]
pub struct FeeEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub student_id: Option<Uuid>,
    pub fee_type: String,
    pub academic_year: String,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl FeeEntity {
    pub fn status(&self) -> Result<FeeStatus, sqlx::Error> {
        decode_enum("status", &self.status, FeeStatus::parse)
    }

    pub fn into_response(self) -> Result<FeeResponse, sqlx::Error> {
        let status = self.status()?;
        Ok(FeeResponse {
            id: self.id,
            student_id: self.student_id,
            fee_type: self.fee_type,
            academic_year: self.academic_year,
            amount: self.amount,
            due_date: self.due_date,
            status,
            created_at: self.created_at,
        })
    }
}
