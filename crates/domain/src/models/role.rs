//! Role assignment and invitation domain models.
//!
//! A role binding is either granted immediately (the invitee already has an
//! account) or parked as a pending row that the invitee resolves from their
//! notification feed after signing up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Permission roles a user can hold. A user may hold several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Manager,
    Student,
    Parent,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Manager => "manager",
            Role::Student => "student",
            Role::Parent => "parent",
            Role::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "manager" => Some(Role::Manager),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// Roles that may manage members, records and exports.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an admin targets the invitee when assigning a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// The invitee already has an account; grant immediately.
    ByUserId,
    /// Pre-register by email; resolved once the invitee signs up.
    ByEmail,
    /// Create a brand-new member record, then invite by email.
    NewMember,
}

/// Lifecycle of a pending role request.
///
/// `Accepted` and `Rejected` are terminal; a resolved row is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingRoleStatus {
    Pending,
    Accepted,
    Rejected,
}

impl PendingRoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PendingRoleStatus::Pending => "pending",
            PendingRoleStatus::Accepted => "accepted",
            PendingRoleStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PendingRoleStatus::Pending),
            "accepted" => Some(PendingRoleStatus::Accepted),
            "rejected" => Some(PendingRoleStatus::Rejected),
            _ => None,
        }
    }

    /// Whether a resolution (accept or reject) is still allowed.
    pub fn can_resolve(&self) -> bool {
        matches!(self, PendingRoleStatus::Pending)
    }
}

impl std::fmt::Display for PendingRoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request from a prospective member asking to join a madrasa.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    /// Join requests are limited to the low-privilege roles.
    pub role: Role,

    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(custom(function = "shared::validation::validate_contact_number"))]
    pub contact_number: Option<String>,
}

/// Admin request to assign a role to an existing or prospective member.
///
/// Which fields are required depends on the assignment mode, mirroring the
/// three branches of the assignment dialog.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_assignment_fields", skip_on_field_errors = false))]
pub struct AssignRoleRequest {
    pub mode: AssignmentMode,

    pub role: Role,

    /// Required for `by_user_id`.
    pub user_id: Option<Uuid>,

    /// Required for `by_email` and `new_member`.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    /// Required for `new_member`.
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_contact_number"))]
    pub contact_number: Option<String>,
}

fn validate_assignment_fields(req: &AssignRoleRequest) -> Result<(), validator::ValidationError> {
    let missing = |field: &'static str, message: &'static str| {
        let mut err = validator::ValidationError::new(field);
        err.message = Some(message.into());
        Err(err)
    };

    match req.mode {
        AssignmentMode::ByUserId => {
            if req.user_id.is_none() {
                return missing("user_id_required", "User id is required for this mode");
            }
        }
        AssignmentMode::ByEmail => {
            if req.email.as_deref().map_or(true, str::is_empty) {
                return missing("email_required", "Email is required for this mode");
            }
        }
        AssignmentMode::NewMember => {
            if req.email.as_deref().map_or(true, str::is_empty) {
                return missing("email_required", "Email is required for this mode");
            }
            if req.full_name.as_deref().map_or(true, str::is_empty) {
                return missing("full_name_required", "Full name is required for this mode");
            }
        }
    }
    Ok(())
}

/// Whether a pending row is addressed to the given account email.
///
/// Invitation emails are typed by hand; comparison ignores case and
/// surrounding whitespace.
pub fn invitation_addressed_to(invitation_email: &str, account_email: &str) -> bool {
    invitation_email
        .trim()
        .eq_ignore_ascii_case(account_email.trim())
}

/// Outcome of a role assignment: either an immediate grant or a parked
/// pending request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignRoleOutcome {
    Granted(UserRoleResponse),
    Invited(PendingRoleResponse),
}

/// A granted role binding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserRoleResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
}

/// A pending role request awaiting resolution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PendingRoleResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: PendingRoleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn base_request(mode: AssignmentMode) -> AssignRoleRequest {
        AssignRoleRequest {
            mode,
            role: Role::Teacher,
            user_id: None,
            email: None,
            full_name: None,
            contact_number: None,
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [
            Role::Admin,
            Role::Teacher,
            Role::Manager,
            Role::Student,
            Role::Parent,
            Role::User,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superadmin"), None);
    }

    #[test]
    fn only_admin_and_manager_can_manage() {
        assert!(Role::Admin.can_manage());
        assert!(Role::Manager.can_manage());
        assert!(!Role::Teacher.can_manage());
        assert!(!Role::User.can_manage());
    }

    #[test]
    fn terminal_statuses_cannot_resolve() {
        assert!(PendingRoleStatus::Pending.can_resolve());
        assert!(!PendingRoleStatus::Accepted.can_resolve());
        assert!(!PendingRoleStatus::Rejected.can_resolve());
    }

    #[test]
    fn join_request_requires_valid_email_and_name() {
        let valid = JoinRequest {
            email: SafeEmail().fake(),
            role: Role::User,
            full_name: Name().fake(),
            contact_number: Some("+92 300 1234567".to_string()),
        };
        assert!(valid.validate().is_ok());

        let invalid = JoinRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = JoinRequest {
            full_name: String::new(),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn by_user_id_mode_requires_user_id() {
        let mut request = base_request(AssignmentMode::ByUserId);
        assert!(request.validate().is_err());

        request.user_id = Some(Uuid::new_v4());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn by_email_mode_requires_email() {
        let mut request = base_request(AssignmentMode::ByEmail);
        assert!(request.validate().is_err());

        request.email = Some(SafeEmail().fake());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn new_member_mode_requires_email_and_name() {
        let mut request = base_request(AssignmentMode::NewMember);
        assert!(request.validate().is_err());

        request.email = Some(SafeEmail().fake());
        assert!(request.validate().is_err());

        request.full_name = Some(Name().fake());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn invitation_email_match_ignores_case_and_whitespace() {
        assert!(invitation_addressed_to("Imam@Example.com", "imam@example.com"));
        assert!(invitation_addressed_to(" imam@example.com ", "imam@example.com"));
        assert!(!invitation_addressed_to(
            "imam@example.com",
            "other@example.com"
        ));
    }

    #[test]
    fn assignment_mode_serde_uses_snake_case() {
        let parsed: AssignmentMode = serde_json::from_str("\"by_user_id\"").unwrap();
        assert_eq!(parsed, AssignmentMode::ByUserId);
        let parsed: AssignmentMode = serde_json::from_str("\"new_member\"").unwrap();
        assert_eq!(parsed, AssignmentMode::NewMember);
        assert!(serde_json::from_str::<AssignmentMode>("\"by_phone\"").is_err());
    }
}
