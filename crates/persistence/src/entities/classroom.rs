//! Class entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::classroom::ClassResponse;

/// Database row mapping for the classes table.
#[derive(Debug, Clone, FromRow)]
pub struct ClassEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub name: String,
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClassEntity {
    pub fn into_response(self) -> ClassResponse {
        ClassResponse {
            id: self.id,
            name: self.name,
            section: self.section,
            created_at: self.created_at,
        }
    }
}
