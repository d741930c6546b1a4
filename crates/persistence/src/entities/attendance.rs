//! Attendance entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::attendance::{AttendanceResponse, AttendanceStatus, TimeSlot};

use super::decode_enum;

/// Database row mapping for the attendance table.
///
/// The natural key (madrasa_id, student_id, date, time_slot) is unique.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub student_id: Uuid,
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AttendanceEntity {
    pub fn status(&self) -> Result<AttendanceStatus, sqlx::Error> {
        decode_enum("status", &self.status, AttendanceStatus::parse)
    }

    pub fn time_slot(&self) -> Result<TimeSlot, sqlx::Error> {
        decode_enum("time_slot", &self.time_slot, TimeSlot::parse)
    }

    pub fn into_response(self) -> Result<AttendanceResponse, sqlx::Error> {
        let status = self.status()?;
        let time_slot = self.time_slot()?;
        Ok(AttendanceResponse {
            id: self.id,
            student_id: self.student_id,
            class_id: self.class_id,
            date: self.date,
            time_slot,
            status,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(time_slot: &str, status: &str) -> AttendanceEntity {
        AttendanceEntity {
            id: Uuid::new_v4(),
            madrasa_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            class_id: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time_slot: time_slot.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_row_converts() {
        let response = entity("morning", "late").into_response().unwrap();
        assert_eq!(response.time_slot, TimeSlot::Morning);
        assert_eq!(response.status, AttendanceStatus::Late);
    }

    #[test]
    fn unknown_slot_is_a_decode_error() {
        assert!(entity("noon", "present").into_response().is_err());
    }
}
