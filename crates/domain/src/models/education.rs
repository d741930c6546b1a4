//! Daily education (hifz progress) report models.
//!
//! Each entry records the day's sabak, sabqi and manzil progress for one
//! student. An absent field means "not recorded", never zero.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to create or update a daily education report entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertEducationReportRequest {
    #[validate(required(message = "Student id is required"))]
    pub student_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_record_date"))]
    pub date: NaiveDate,

    /// Para number of the new lesson, 1 to 30.
    #[validate(range(min = 1, max = 30, message = "Para number must be between 1 and 30"))]
    pub sabak_para_no: Option<i32>,

    pub sabqi_recited: Option<bool>,

    #[validate(length(max = 100, message = "Sabqi amount must be at most 100 characters"))]
    pub sabqi_amount: Option<String>,

    /// Revision portion number, 1 to 7 in the weekly rotation.
    #[validate(range(min = 1, max = 7, message = "Manzil number must be between 1 and 7"))]
    pub manzil_number: Option<i32>,
}

impl UpsertEducationReportRequest {
    /// Whether the entry carries any progress at all.
    pub fn is_empty(&self) -> bool {
        self.sabak_para_no.is_none()
            && self.sabqi_recited.is_none()
            && self.sabqi_amount.is_none()
            && self.manzil_number.is_none()
    }
}

/// Education report entry as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EducationReportResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sabak_para_no: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sabqi_recited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sabqi_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manzil_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the education report list.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListEducationReportsQuery {
    pub student_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> UpsertEducationReportRequest {
        UpsertEducationReportRequest {
            student_id: Some(Uuid::new_v4()),
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            sabak_para_no: Some(12),
            sabqi_recited: Some(true),
            sabqi_amount: Some("half para".to_string()),
            manzil_number: Some(3),
        }
    }

    #[test]
    fn valid_entry_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn para_number_bounds_enforced() {
        let mut request = valid_request();
        request.sabak_para_no = Some(31);
        assert!(request.validate().is_err());
        request.sabak_para_no = Some(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn all_progress_fields_optional() {
        let request = UpsertEducationReportRequest {
            sabak_para_no: None,
            sabqi_recited: None,
            sabqi_amount: None,
            manzil_number: None,
            ..valid_request()
        };
        assert!(request.validate().is_ok());
        assert!(request.is_empty());
    }

    #[test]
    fn missing_student_rejected() {
        let mut request = valid_request();
        request.student_id = None;
        assert!(request.validate().is_err());
    }
}
