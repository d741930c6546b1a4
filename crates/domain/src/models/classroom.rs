//! Class (section) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to create or update a class.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name is required"))]
    pub name: String,

    #[validate(length(max = 50, message = "Section must be at most 50 characters"))]
    pub section: Option<String>,
}

/// Class as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClassResponse {
    /// Display label combining name and section, as shown in pickers.
    pub fn display_label(&self) -> String {
        match &self.section {
            Some(section) if !section.is_empty() => format!("{} - {}", self.name, section),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_includes_section_when_present() {
        let class = ClassResponse {
            id: Uuid::new_v4(),
            name: "Hifz".to_string(),
            section: Some("A".to_string()),
            created_at: Utc::now(),
        };
        assert_eq!(class.display_label(), "Hifz - A");

        let class = ClassResponse {
            section: None,
            ..class
        };
        assert_eq!(class.display_label(), "Hifz");
    }

    #[test]
    fn empty_class_name_rejected() {
        let request = UpsertClassRequest {
            name: String::new(),
            section: None,
        };
        assert!(request.validate().is_err());
    }
}
