//! Notification feed routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::notification::NotificationFeedResponse;
use persistence::repositories::NotificationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

const DEFAULT_FEED_LIMIT: i64 = 50;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/notifications
///
/// The caller's feed, newest first, with the unread badge count.
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<FeedQuery>,
) -> Result<Json<NotificationFeedResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, 200);

    let repo = NotificationRepository::new(state.pool.clone());
    let entities = repo.list_for_user(auth.user_id, limit).await?;
    let unread_count = repo.unread_count(auth.user_id).await?;

    let notifications = entities
        .into_iter()
        .map(|n| n.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(NotificationFeedResponse {
        notifications,
        unread_count,
    }))
}

/// POST /api/v1/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let found = repo.mark_read(auth.user_id, id).await?;

    if !found {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<StatusCode, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    repo.mark_all_read(auth.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
