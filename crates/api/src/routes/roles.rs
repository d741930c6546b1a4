//! Role assignment, join request and invitation routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::notification::{NewNotification, RoleInvitationData};
use domain::models::role::{
    invitation_addressed_to, AssignRoleOutcome, AssignRoleRequest, AssignmentMode, JoinRequest,
    PendingRoleResponse, PendingRoleStatus, Role, UserRoleResponse,
};
use persistence::repositories::pending_user_role::ResolutionOutcome;
use persistence::repositories::{
    NotificationRepository, PendingUserRoleRepository, ProfileRepository, UserRoleRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// Assigning and revoking roles requires a managing role.
async fn ensure_can_manage(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    let roles = UserRoleRepository::new(state.pool.clone())
        .list_for_user(user_id)
        .await?;
    let allowed = roles
        .iter()
        .filter_map(|r| r.role().ok())
        .any(|role| role.can_manage());

    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Managing roles requires the admin or manager role".to_string(),
        ))
    }
}

/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<UserRoleResponse>>, ApiError> {
    let repo = UserRoleRepository::new(state.pool.clone());
    let roles = repo.list_for_madrasa(auth.madrasa_id).await?;

    roles
        .into_iter()
        .map(|r| r.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// POST /api/v1/roles/assign
///
/// Either grants immediately (the invitee already has an account) or parks
/// a pending request the invitee resolves from their notification feed.
pub async fn assign_role(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<AssignRoleRequest>,
) -> Result<(StatusCode, Json<AssignRoleOutcome>), ApiError> {
    request.validate()?;
    ensure_can_manage(&state, auth.user_id).await?;

    match request.mode {
        AssignmentMode::ByUserId => {
            let user_id = request
                .user_id
                .ok_or_else(|| ApiError::Validation("User id is required".to_string()))?;

            let roles = UserRoleRepository::new(state.pool.clone());
            let granted = roles.grant(user_id, request.role).await?;

            let notifications = NotificationRepository::new(state.pool.clone());
            notifications
                .create(&NewNotification::role_granted(user_id, request.role))
                .await?;

            info!(
                user_id = %user_id,
                role = %request.role,
                assigned_by = %auth.user_id,
                madrasa_id = %auth.madrasa_id,
                "Role granted directly"
            );

            Ok((
                StatusCode::CREATED,
                Json(AssignRoleOutcome::Granted(granted.into_response()?)),
            ))
        }
        AssignmentMode::ByEmail | AssignmentMode::NewMember => {
            let email = request
                .email
                .as_deref()
                .ok_or_else(|| ApiError::Validation("Email is required".to_string()))?;

            let pending_repo = PendingUserRoleRepository::new(state.pool.clone());
            let pending = pending_repo
                .create(
                    auth.madrasa_id,
                    email,
                    request.role,
                    request.full_name.as_deref(),
                    request.contact_number.as_deref(),
                )
                .await?;

            // Deliver the invitation now if the invitee already has an
            // account; otherwise it waits for their first sign-in.
            let profiles = ProfileRepository::new(state.pool.clone());
            if let Some(profile) = profiles.find_by_email(email).await? {
                let data = RoleInvitationData {
                    pending_role_id: pending.id,
                    role: request.role,
                    email: email.to_string(),
                };
                NotificationRepository::new(state.pool.clone())
                    .create(&NewNotification::role_invitation(profile.user_id, &data))
                    .await?;
            }

            info!(
                pending_role_id = %pending.id,
                role = %request.role,
                assigned_by = %auth.user_id,
                madrasa_id = %auth.madrasa_id,
                "Role invitation created"
            );

            Ok((
                StatusCode::CREATED,
                Json(AssignRoleOutcome::Invited(pending.into_response()?)),
            ))
        }
    }
}

/// DELETE /api/v1/roles/:id
pub async fn revoke_role(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_can_manage(&state, auth.user_id).await?;

    let repo = UserRoleRepository::new(state.pool.clone());
    let revoked = repo.revoke(id).await?;

    if !revoked {
        return Err(ApiError::NotFound("Role binding not found".to_string()));
    }

    info!(role_id = %id, revoked_by = %auth.user_id, "Role revoked");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/roles/join-requests
///
/// Self-service request from a prospective member; always lands pending.
pub async fn submit_join_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<PendingRoleResponse>), ApiError> {
    request.validate()?;

    if !matches!(request.role, Role::Teacher | Role::User) {
        return Err(ApiError::Validation(
            "Join requests are limited to the teacher and user roles".to_string(),
        ));
    }

    let repo = PendingUserRoleRepository::new(state.pool.clone());
    let pending = repo
        .create(
            auth.madrasa_id,
            &request.email,
            request.role,
            Some(&request.full_name),
            request.contact_number.as_deref(),
        )
        .await?;

    info!(
        pending_role_id = %pending.id,
        role = %request.role,
        madrasa_id = %auth.madrasa_id,
        "Join request submitted"
    );

    Ok((StatusCode::CREATED, Json(pending.into_response()?)))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListPendingQuery {
    pub status: Option<PendingRoleStatus>,
}

/// GET /api/v1/roles/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListPendingQuery>,
) -> Result<Json<Vec<PendingRoleResponse>>, ApiError> {
    ensure_can_manage(&state, auth.user_id).await?;

    let repo = PendingUserRoleRepository::new(state.pool.clone());
    let pending = repo.list(auth.madrasa_id, query.status).await?;

    pending
        .into_iter()
        .map(|p| p.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// GET /api/v1/roles/invitations
///
/// Pending invitations addressed to the caller's account email. An invitee
/// who signed up after being invited discovers their invitation here.
pub async fn my_invitations(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<PendingRoleResponse>>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());
    let Some(profile) = profiles.find_by_user_id(auth.user_id).await? else {
        return Ok(Json(Vec::new()));
    };

    let repo = PendingUserRoleRepository::new(state.pool.clone());
    let pending = repo
        .list_pending_for_email(auth.madrasa_id, &profile.email)
        .await?;

    pending
        .into_iter()
        .map(|p| p.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// Who a resolution may act for: the invitee themselves, or a manager
/// resolving on the invitee's behalf. The role always goes to the account
/// the row is addressed to, never to the caller.
async fn resolution_target(
    state: &AppState,
    auth: &AuthContext,
    pending_email: &str,
) -> Result<Option<Uuid>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());

    let caller = profiles.find_by_user_id(auth.user_id).await?;
    let addressed_to_caller = caller
        .as_ref()
        .map(|p| invitation_addressed_to(pending_email, &p.email))
        .unwrap_or(false);

    if addressed_to_caller {
        return Ok(Some(auth.user_id));
    }

    ensure_can_manage(state, auth.user_id).await?;
    Ok(profiles
        .find_by_email(pending_email)
        .await?
        .map(|p| p.user_id))
}

/// POST /api/v1/roles/pending/:id/accept
///
/// One transaction: guarded status flip, idempotent role insert, and the
/// originating notification marked read. Only the invitee or a manager may
/// accept; the role is granted to the invitee's account.
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<PendingRoleResponse>, ApiError> {
    let repo = PendingUserRoleRepository::new(state.pool.clone());
    let pending = repo
        .find_by_id(auth.madrasa_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    let grantee = resolution_target(&state, &auth, &pending.email)
        .await?
        .ok_or_else(|| {
            ApiError::InvalidState("Invitee has not signed up yet".to_string())
        })?;

    match repo.accept(auth.madrasa_id, id, grantee).await? {
        ResolutionOutcome::Resolved(entity) => {
            info!(
                pending_role_id = %id,
                user_id = %auth.user_id,
                madrasa_id = %auth.madrasa_id,
                "Invitation accepted"
            );
            Ok(Json(entity.into_response()?))
        }
        ResolutionOutcome::AlreadyResolved => Err(ApiError::InvalidState(
            "Invitation has already been resolved".to_string(),
        )),
        ResolutionOutcome::NotFound => {
            Err(ApiError::NotFound("Invitation not found".to_string()))
        }
    }
}

/// POST /api/v1/roles/pending/:id/reject
///
/// Same authorization as accept; rejection never creates a role row, so an
/// invitee without an account yet is not an error here.
pub async fn reject_invitation(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<PendingRoleResponse>, ApiError> {
    let repo = PendingUserRoleRepository::new(state.pool.clone());
    let pending = repo
        .find_by_id(auth.madrasa_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    let target = resolution_target(&state, &auth, &pending.email)
        .await?
        .unwrap_or(auth.user_id);

    match repo.reject(auth.madrasa_id, id, target).await? {
        ResolutionOutcome::Resolved(entity) => {
            info!(
                pending_role_id = %id,
                user_id = %auth.user_id,
                madrasa_id = %auth.madrasa_id,
                "Invitation rejected"
            );
            Ok(Json(entity.into_response()?))
        }
        ResolutionOutcome::AlreadyResolved => Err(ApiError::InvalidState(
            "Invitation has already been resolved".to_string(),
        )),
        ResolutionOutcome::NotFound => {
            Err(ApiError::NotFound("Invitation not found".to_string()))
        }
    }
}
