//! Attendance routes: marking, availability, clearing and the register.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::attendance::{
    self, AttendanceResponse, BulkMarkAttendanceRequest, MarkAttendanceRequest,
    NewAttendanceRecord, StudentRef, TimeSlot,
};
use domain::models::report::{build_register_grid, RegisterGrid};
use persistence::repositories::{AttendanceRepository, StudentRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// First and last day of a calendar month.
pub(crate) fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::Validation("Invalid year/month".to_string()))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| ApiError::Validation("Invalid year/month".to_string()))?;
    Ok((first, next_first.pred_opt().unwrap_or(first)))
}

/// POST /api/v1/attendance
///
/// Upsert on the natural key: a second mark for the same (student, date,
/// time slot) updates the existing record.
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, ApiError> {
    request.validate()?;
    let student_id = request
        .student_id
        .ok_or_else(|| ApiError::Validation("Please select a student".to_string()))?;

    let students = StudentRepository::new(state.pool.clone());
    let student = students
        .find_by_id(auth.madrasa_id, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let record = NewAttendanceRecord {
        student_id,
        class_id: request.class_id.or(student.class_id),
        date: request.date,
        time_slot: request.time_slot,
        status: request.status,
    };

    let repo = AttendanceRepository::new(state.pool.clone());
    let entity = repo.upsert(auth.madrasa_id, &record).await?;

    info!(
        student_id = %student_id,
        date = %request.date,
        time_slot = %request.time_slot,
        status = %request.status,
        madrasa_id = %auth.madrasa_id,
        "Attendance marked"
    );

    Ok(Json(entity.into_response()?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkMarkResponse {
    pub written: u64,
}

/// POST /api/v1/attendance/bulk
pub async fn mark_attendance_bulk(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<BulkMarkAttendanceRequest>,
) -> Result<Json<BulkMarkResponse>, ApiError> {
    request.validate()?;

    let students = StudentRepository::new(state.pool.clone());
    let refs = students.list_refs(auth.madrasa_id, None).await?;

    let records = attendance::expand_bulk(&request, &refs);

    let repo = AttendanceRepository::new(state.pool.clone());
    let written = repo.upsert_bulk(auth.madrasa_id, &records).await?;

    info!(
        requested = request.student_ids.len(),
        written,
        date = %request.date,
        time_slot = %request.time_slot,
        madrasa_id = %auth.madrasa_id,
        "Bulk attendance marked"
    );

    Ok(Json(BulkMarkResponse { written }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusQuery {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: Option<TimeSlot>,
}

/// GET /api/v1/attendance/status
///
/// The most specific existing record, or null when none exists.
pub async fn attendance_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Option<AttendanceResponse>>, ApiError> {
    let repo = AttendanceRepository::new(state.pool.clone());
    let entity = repo
        .status_of(auth.madrasa_id, query.student_id, query.date, query.time_slot)
        .await?;

    entity
        .map(|e| e.into_response().map_err(ApiError::from))
        .transpose()
        .map(Json)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClearQuery {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
}

/// DELETE /api/v1/attendance
///
/// Explicit deletion path for the quick-edit cycle landing back on "none".
pub async fn clear_attendance(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ClearQuery>,
) -> Result<StatusCode, ApiError> {
    let repo = AttendanceRepository::new(state.pool.clone());
    let cleared = repo
        .clear(auth.madrasa_id, query.student_id, query.date, query.time_slot)
        .await?;

    if !cleared {
        return Err(ApiError::NotFound("No attendance record for that key".to_string()));
    }

    info!(
        student_id = %query.student_id,
        date = %query.date,
        time_slot = %query.time_slot,
        madrasa_id = %auth.madrasa_id,
        "Attendance cleared"
    );

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AvailableQuery {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AvailableStudent {
    pub student_id: Uuid,
    pub class_id: Option<Uuid>,
}

impl From<StudentRef> for AvailableStudent {
    fn from(s: StudentRef) -> Self {
        Self {
            student_id: s.id,
            class_id: s.class_id,
        }
    }
}

/// GET /api/v1/attendance/available
///
/// Students not yet marked for the given (date, time slot). Re-derived on
/// every call so the entry form never offers to double-mark.
pub async fn available_students(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Vec<AvailableStudent>>, ApiError> {
    let students = StudentRepository::new(state.pool.clone());
    let refs = students.list_refs(auth.madrasa_id, query.class_id).await?;

    let repo = AttendanceRepository::new(state.pool.clone());
    let existing = repo
        .existing_keys(auth.madrasa_id, query.date, query.time_slot)
        .await?;

    let available =
        attendance::available_students(&refs, &existing, query.date, query.time_slot);

    Ok(Json(available.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterQuery {
    pub year: i32,
    pub month: u32,
    pub time_slot: TimeSlot,
    pub class_id: Option<Uuid>,
}

/// GET /api/v1/attendance/register
///
/// The monthly register grid: one row per student, one cell per day.
pub async fn month_register(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<RegisterQuery>,
) -> Result<Json<RegisterGrid>, ApiError> {
    let (first, last) = month_bounds(query.year, query.month)?;

    let students = StudentRepository::new(state.pool.clone());
    let names = students
        .list_names(auth.madrasa_id, query.class_id)
        .await?;

    let repo = AttendanceRepository::new(state.pool.clone());
    let entities = repo
        .range_records(auth.madrasa_id, first, last, query.time_slot, query.class_id)
        .await?;

    let mut records = Vec::with_capacity(entities.len());
    for entity in entities {
        records.push((entity.student_id, entity.date, entity.status()?));
    }

    let days: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
    let grid = build_register_grid(query.time_slot, &names, &days, &records);

    Ok(Json(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_handles_year_wrap() {
        let (first, last) = month_bounds(2024, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn month_bounds_handles_leap_february() {
        let (_, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_bounds_rejects_invalid_month() {
        assert!(month_bounds(2024, 13).is_err());
        assert!(month_bounds(2024, 0).is_err());
    }
}
