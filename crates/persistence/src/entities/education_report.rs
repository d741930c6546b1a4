//! Education report entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::education::EducationReportResponse;

/// Database row mapping for the education_reports table.
///
/// NULL progress columns mean "not recorded", never zero.
#[derive(Debug, Clone, FromRow)]
pub struct EducationReportEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub sabak_para_no: Option<i32>,
    pub sabqi_recited: Option<bool>,
    pub sabqi_amount: Option<String>,
    pub manzil_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl EducationReportEntity {
    pub fn into_response(self) -> EducationReportResponse {
        EducationReportResponse {
            id: self.id,
            student_id: self.student_id,
            date: self.date,
            sabak_para_no: self.sabak_para_no,
            sabqi_recited: self.sabqi_recited,
            sabqi_amount: self.sabqi_amount,
            manzil_number: self.manzil_number,
            created_at: self.created_at,
        }
    }
}
