//! Attendance domain models and the status cycle engine.
//!
//! Attendance is keyed by the natural key (student, date, time slot); one
//! record at most exists per key. The register quick-edit cycles a cell
//! through the five states without opening a form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Presence status for one student, day and time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Stable database/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            "excused" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }

    /// Register symbol for this status.
    pub fn symbol(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "✓",
            AttendanceStatus::Absent => "✗",
            AttendanceStatus::Late => "△",
            AttendanceStatus::Excused => "○",
        }
    }

    /// Advance one step in the quick-edit cycle.
    ///
    /// The cycle is the closed 5-element sequence
    /// `None → Present → Absent → Late → Excused → None`; applying it five
    /// times returns to the starting state. Landing back on `None` does not
    /// itself delete anything — callers invoke the explicit clear operation
    /// for that.
    pub fn cycle(current: Option<AttendanceStatus>) -> Option<AttendanceStatus> {
        match current {
            None => Some(AttendanceStatus::Present),
            Some(AttendanceStatus::Present) => Some(AttendanceStatus::Absent),
            Some(AttendanceStatus::Absent) => Some(AttendanceStatus::Late),
            Some(AttendanceStatus::Late) => Some(AttendanceStatus::Excused),
            Some(AttendanceStatus::Excused) => None,
        }
    }

    /// Symbol for an optional status, "–" when no record exists.
    pub fn symbol_or_dash(status: Option<AttendanceStatus>) -> &'static str {
        status.map(|s| s.symbol()).unwrap_or("–")
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of day-parts disambiguating multiple checks per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(TimeSlot::Morning),
            "afternoon" => Some(TimeSlot::Afternoon),
            "evening" => Some(TimeSlot::Evening),
            "night" => Some(TimeSlot::Night),
            _ => None,
        }
    }

    /// Urdu label used on printed registers.
    pub fn label_ur(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "صبح",
            TimeSlot::Afternoon => "دوپہر",
            TimeSlot::Evening => "شام",
            TimeSlot::Night => "رات",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal student view needed by the engine: identity plus the class the
/// student currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRef {
    pub id: Uuid,
    pub class_id: Option<Uuid>,
}

/// An existing record's natural key, used for availability filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttendanceKey {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
}

/// Request to mark a single student.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MarkAttendanceRequest {
    /// Selected student. Optional on the wire so an unselected student is a
    /// validation error rather than a deserialization failure.
    #[validate(required(message = "Please select a student"))]
    pub student_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_record_date"))]
    pub date: NaiveDate,

    pub time_slot: TimeSlot,

    pub status: AttendanceStatus,

    /// Class snapshot; when omitted the student's current class is used.
    pub class_id: Option<Uuid>,
}

/// Request to mark a set of students at once with the same date/slot/status.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct BulkMarkAttendanceRequest {
    #[validate(custom(function = "shared::validation::validate_record_date"))]
    pub date: NaiveDate,

    pub time_slot: TimeSlot,

    pub status: AttendanceStatus,

    #[validate(length(min = 1, message = "Please select at least one student"))]
    pub student_ids: Vec<Uuid>,
}

/// One attendance row ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    pub student_id: Uuid,
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub status: AttendanceStatus,
}

/// Attendance record as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub status: AttendanceStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Students not yet marked for the given (date, time slot).
///
/// Pure set difference, re-derived on every call; the entry form uses it so
/// it never offers to double-mark a student.
pub fn available_students(
    students: &[StudentRef],
    existing: &[AttendanceKey],
    date: NaiveDate,
    time_slot: TimeSlot,
) -> Vec<StudentRef> {
    students
        .iter()
        .filter(|s| {
            !existing
                .iter()
                .any(|k| k.student_id == s.id && k.date == date && k.time_slot == time_slot)
        })
        .copied()
        .collect()
}

/// Expand a validated bulk request into one record per selected student.
///
/// Each record carries the student's class_id snapshot at call time, not a
/// live reference. Unknown student ids are skipped; the caller has already
/// fetched the tenant's student list, so a missing id means the selection
/// raced a deletion.
pub fn expand_bulk(
    request: &BulkMarkAttendanceRequest,
    students: &[StudentRef],
) -> Vec<NewAttendanceRecord> {
    request
        .student_ids
        .iter()
        .filter_map(|student_id| {
            let student = students.iter().find(|s| s.id == *student_id)?;
            Some(NewAttendanceRecord {
                student_id: student.id,
                class_id: student.class_id,
                date: request.date,
                time_slot: request.time_slot,
                status: request.status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cycle_advances_in_order() {
        assert_eq!(
            AttendanceStatus::cycle(None),
            Some(AttendanceStatus::Present)
        );
        assert_eq!(
            AttendanceStatus::cycle(Some(AttendanceStatus::Present)),
            Some(AttendanceStatus::Absent)
        );
        assert_eq!(
            AttendanceStatus::cycle(Some(AttendanceStatus::Absent)),
            Some(AttendanceStatus::Late)
        );
        assert_eq!(
            AttendanceStatus::cycle(Some(AttendanceStatus::Late)),
            Some(AttendanceStatus::Excused)
        );
        assert_eq!(AttendanceStatus::cycle(Some(AttendanceStatus::Excused)), None);
    }

    #[test]
    fn cycle_has_period_exactly_five() {
        let starts = [
            None,
            Some(AttendanceStatus::Present),
            Some(AttendanceStatus::Absent),
            Some(AttendanceStatus::Late),
            Some(AttendanceStatus::Excused),
        ];
        for start in starts {
            let mut state = start;
            for step in 1..=5 {
                state = AttendanceStatus::cycle(state);
                if step < 5 {
                    assert_ne!(state, start, "cycle returned early at step {}", step);
                }
            }
            assert_eq!(state, start);
        }
    }

    #[test]
    fn symbols_match_register_legend() {
        assert_eq!(AttendanceStatus::Present.symbol(), "✓");
        assert_eq!(AttendanceStatus::Absent.symbol(), "✗");
        assert_eq!(AttendanceStatus::Late.symbol(), "△");
        assert_eq!(AttendanceStatus::Excused.symbol(), "○");
        assert_eq!(AttendanceStatus::symbol_or_dash(None), "–");
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
            AttendanceStatus::Excused,
        ] {
            assert_eq!(AttendanceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::parse("holiday"), None);
    }

    #[test]
    fn time_slot_round_trips_through_strings() {
        for slot in [
            TimeSlot::Morning,
            TimeSlot::Afternoon,
            TimeSlot::Evening,
            TimeSlot::Night,
        ] {
            assert_eq!(TimeSlot::parse(slot.as_str()), Some(slot));
        }
        assert_eq!(TimeSlot::parse("noon"), None);
    }

    #[test]
    fn available_students_excludes_already_marked() {
        let s1 = StudentRef {
            id: Uuid::new_v4(),
            class_id: None,
        };
        let s2 = StudentRef {
            id: Uuid::new_v4(),
            class_id: Some(Uuid::new_v4()),
        };
        let date = day(2024, 3, 1);
        let existing = vec![AttendanceKey {
            student_id: s1.id,
            date,
            time_slot: TimeSlot::Morning,
        }];

        let available = available_students(&[s1, s2], &existing, date, TimeSlot::Morning);
        assert_eq!(available, vec![s2]);

        // A record for a different slot does not block the student.
        let available = available_students(&[s1, s2], &existing, date, TimeSlot::Evening);
        assert_eq!(available, vec![s1, s2]);

        // Nor does a record for a different day.
        let available = available_students(&[s1, s2], &existing, day(2024, 3, 2), TimeSlot::Morning);
        assert_eq!(available, vec![s1, s2]);
    }

    #[test]
    fn empty_bulk_selection_is_a_validation_error() {
        let request = BulkMarkAttendanceRequest {
            date: day(2024, 3, 1),
            time_slot: TimeSlot::Morning,
            status: AttendanceStatus::Present,
            student_ids: vec![],
        };
        assert!(request.validate().is_err());
        // A request that never validates produces zero records downstream.
        assert!(expand_bulk(&request, &[]).is_empty());
    }

    #[test]
    fn bulk_expansion_snapshots_class_ids() {
        let class_a = Uuid::new_v4();
        let s1 = StudentRef {
            id: Uuid::new_v4(),
            class_id: Some(class_a),
        };
        let s2 = StudentRef {
            id: Uuid::new_v4(),
            class_id: None,
        };
        let request = BulkMarkAttendanceRequest {
            date: day(2024, 3, 1),
            time_slot: TimeSlot::Evening,
            status: AttendanceStatus::Late,
            student_ids: vec![s1.id, s2.id],
        };
        assert!(request.validate().is_ok());

        let records = expand_bulk(&request, &[s1, s2]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].class_id, Some(class_a));
        assert_eq!(records[1].class_id, None);
        for record in &records {
            assert_eq!(record.date, request.date);
            assert_eq!(record.time_slot, TimeSlot::Evening);
            assert_eq!(record.status, AttendanceStatus::Late);
        }
    }

    #[test]
    fn bulk_expansion_skips_unknown_students() {
        let s1 = StudentRef {
            id: Uuid::new_v4(),
            class_id: None,
        };
        let request = BulkMarkAttendanceRequest {
            date: day(2024, 3, 1),
            time_slot: TimeSlot::Morning,
            status: AttendanceStatus::Present,
            student_ids: vec![s1.id, Uuid::new_v4()],
        };
        let records = expand_bulk(&request, &[s1]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_id, s1.id);
    }

    #[test]
    fn single_mark_requires_a_student() {
        let request = MarkAttendanceRequest {
            student_id: None,
            date: day(2024, 3, 1),
            time_slot: TimeSlot::Morning,
            status: AttendanceStatus::Present,
            class_id: None,
        };
        assert!(request.validate().is_err());

        let request = MarkAttendanceRequest {
            student_id: Some(Uuid::new_v4()),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn status_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Excused).unwrap(),
            "\"excused\""
        );
        let parsed: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Late);
        assert!(serde_json::from_str::<AttendanceStatus>("\"holiday\"").is_err());
    }
}
