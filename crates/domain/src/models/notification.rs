//! Notification domain models.
//!
//! Notifications are rows in the invitee's feed, created as a side effect of
//! role assignment. The `read` flag only ever moves false → true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::Role;

/// Notification kind enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RoleInvitation,
    RoleGranted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RoleInvitation => "role_invitation",
            NotificationKind::RoleGranted => "role_granted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "role_invitation" => Some(NotificationKind::RoleInvitation),
            "role_granted" => Some(NotificationKind::RoleGranted),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload of a role-invitation notification.
///
/// The invitee's client uses `pending_role_id` to call accept/reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoleInvitationData {
    pub pending_role_id: Uuid,
    pub role: Role,
    pub email: String,
}

/// A new notification ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
}

impl NewNotification {
    /// Build the invitation notification shown to a prospective member.
    pub fn role_invitation(user_id: Uuid, data: &RoleInvitationData) -> Self {
        Self {
            user_id,
            kind: NotificationKind::RoleInvitation,
            title: "Role invitation".to_string(),
            message: format!("You have been invited to join as {}", data.role),
            data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Build the confirmation notification for an immediate grant.
    pub fn role_granted(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            kind: NotificationKind::RoleGranted,
            title: "Role assigned".to_string(),
            message: format!("You have been assigned the {} role", role),
            data: serde_json::json!({ "role": role }),
        }
    }
}

/// Notification as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Feed listing with the unread badge count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationFeedResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_payload_round_trips() {
        let data = RoleInvitationData {
            pending_role_id: Uuid::new_v4(),
            role: Role::Teacher,
            email: "invitee@example.com".to_string(),
        };
        let notification = NewNotification::role_invitation(Uuid::new_v4(), &data);

        assert_eq!(notification.kind, NotificationKind::RoleInvitation);
        let parsed: RoleInvitationData = serde_json::from_value(notification.data).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn granted_message_names_the_role() {
        let notification = NewNotification::role_granted(Uuid::new_v4(), Role::Manager);
        assert_eq!(notification.kind, NotificationKind::RoleGranted);
        assert!(notification.message.contains("manager"));
    }

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [NotificationKind::RoleInvitation, NotificationKind::RoleGranted] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("marketing"), None);
    }
}
