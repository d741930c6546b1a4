//! Student entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::student::{StudentResponse, StudentStatus};

use super::decode_enum;

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub name: String,
    pub father_name: String,
    pub class_id: Option<Uuid>,
    pub age: Option<i32>,
    pub contact: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl StudentEntity {
    pub fn status(&self) -> Result<StudentStatus, sqlx::Error> {
        decode_enum("status", &self.status, StudentStatus::parse)
    }

    pub fn into_response(self) -> Result<StudentResponse, sqlx::Error> {
        let status = self.status()?;
        Ok(StudentResponse {
            id: self.id,
            name: self.name,
            father_name: self.father_name,
            class_id: self.class_id,
            age: self.age,
            contact: self.contact,
            admission_date: self.admission_date,
            status,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str) -> StudentEntity {
        StudentEntity {
            id: Uuid::new_v4(),
            madrasa_id: Uuid::new_v4(),
            name: "Ahmed".to_string(),
            father_name: "Bashir".to_string(),
            class_id: None,
            age: Some(10),
            contact: None,
            admission_date: None,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_status_converts() {
        let response = entity("active").into_response().unwrap();
        assert_eq!(response.status, StudentStatus::Active);
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        assert!(entity("graduated").into_response().is_err());
    }
}
