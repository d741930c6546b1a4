//! User role entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::role::{Role, UserRoleResponse};

use super::decode_enum;

/// Database row mapping for the user_roles table.
///
/// (user_id, role) is unique; a user holds each role at most once.
#[derive(Debug, Clone, FromRow)]
pub struct UserRoleEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    /// Joined from the profiles table for listings; absent on plain inserts.
    #[sqlx(default)]
    pub holder_name: Option<String>,
}

impl UserRoleEntity {
    pub fn role(&self) -> Result<Role, sqlx::Error> {
        decode_enum("role", &self.role, Role::parse)
    }

    pub fn into_response(self) -> Result<UserRoleResponse, sqlx::Error> {
        let role = self.role()?;
        Ok(UserRoleResponse {
            id: self.id,
            user_id: self.user_id,
            role,
            created_at: self.created_at,
            holder_name: self.holder_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_from_stored_string() {
        let entity = UserRoleEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: "teacher".to_string(),
            created_at: Utc::now(),
            holder_name: Some("Ustad Imran".to_string()),
        };
        let response = entity.into_response().unwrap();
        assert_eq!(response.role, Role::Teacher);
        assert_eq!(response.holder_name.as_deref(), Some("Ustad Imran"));
    }
}
