//! Pending user role entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::role::{PendingRoleResponse, PendingRoleStatus, Role};

use super::decode_enum;

/// Database row mapping for the pending_user_roles table.
///
/// Resolved rows (accepted or rejected) are immutable.
#[derive(Debug, Clone, FromRow)]
pub struct PendingUserRoleEntity {
    pub id: Uuid,
    pub madrasa_id: Uuid,
    pub email: String,
    pub role: String,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl PendingUserRoleEntity {
    pub fn role(&self) -> Result<Role, sqlx::Error> {
        decode_enum("role", &self.role, Role::parse)
    }

    pub fn status(&self) -> Result<PendingRoleStatus, sqlx::Error> {
        decode_enum("status", &self.status, PendingRoleStatus::parse)
    }

    /// Whether the row can still be accepted or rejected.
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }

    pub fn into_response(self) -> Result<PendingRoleResponse, sqlx::Error> {
        let role = self.role()?;
        let status = self.status()?;
        Ok(PendingRoleResponse {
            id: self.id,
            email: self.email,
            role,
            status,
            full_name: self.full_name,
            contact_number: self.contact_number,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str) -> PendingUserRoleEntity {
        PendingUserRoleEntity {
            id: Uuid::new_v4(),
            madrasa_id: Uuid::new_v4(),
            email: "invitee@example.com".to_string(),
            role: "teacher".to_string(),
            full_name: None,
            contact_number: None,
            status: status.to_string(),
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn only_pending_rows_are_resolvable() {
        assert!(entity("pending").is_pending());
        assert!(!entity("accepted").is_pending());
        assert!(!entity("rejected").is_pending());
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        assert!(entity("expired").into_response().is_err());
    }
}
