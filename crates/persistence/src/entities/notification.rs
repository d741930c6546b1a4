//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::notification::{NotificationKind, NotificationResponse};

use super::decode_enum;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationEntity {
    pub fn kind(&self) -> Result<NotificationKind, sqlx::Error> {
        decode_enum("kind", &self.kind, NotificationKind::parse)
    }

    pub fn into_response(self) -> Result<NotificationResponse, sqlx::Error> {
        let kind = self.kind()?;
        Ok(NotificationResponse {
            id: self.id,
            user_id: self.user_id,
            kind,
            title: self.title,
            message: self.message,
            data: self.data,
            read: self.read,
            created_at: self.created_at,
        })
    }
}
