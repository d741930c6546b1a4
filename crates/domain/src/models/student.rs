//! Student domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(StudentStatus::Active),
            "inactive" => Some(StudentStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to create or update a student record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertStudentRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Father's name is required"))]
    pub father_name: String,

    /// Weak reference to a class; lookup only, no ownership.
    pub class_id: Option<Uuid>,

    #[validate(range(min = 3, max = 60, message = "Age must be between 3 and 60"))]
    pub age: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_contact_number"))]
    pub contact: Option<String>,

    pub admission_date: Option<NaiveDate>,

    pub status: StudentStatus,
}

/// Student as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub father_name: String,
    pub class_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<NaiveDate>,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the student list.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListStudentsQuery {
    /// Restrict to one class; absent means all classes.
    pub class_id: Option<Uuid>,
    pub status: Option<StudentStatus>,
}

/// Paginated student listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub page_info: shared::pagination::PageInfo,
}
