//! Class CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::classroom::{ClassResponse, UpsertClassRequest};
use persistence::repositories::ClassRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// GET /api/v1/classes
pub async fn list_classes(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<ClassResponse>>, ApiError> {
    let repo = ClassRepository::new(state.pool.clone());
    let classes = repo.list(auth.madrasa_id).await?;

    Ok(Json(
        classes.into_iter().map(|c| c.into_response()).collect(),
    ))
}

/// POST /api/v1/classes
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    request.validate()?;

    let repo = ClassRepository::new(state.pool.clone());
    let class = repo.create(auth.madrasa_id, &request).await?;

    info!(class_id = %class.id, madrasa_id = %auth.madrasa_id, "Class created");

    Ok((StatusCode::CREATED, Json(class.into_response())))
}

/// PUT /api/v1/classes/:id
pub async fn update_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertClassRequest>,
) -> Result<Json<ClassResponse>, ApiError> {
    request.validate()?;

    let repo = ClassRepository::new(state.pool.clone());
    let class = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))?;

    Ok(Json(class.into_response()))
}

/// DELETE /api/v1/classes/:id
pub async fn delete_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ClassRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Class not found".to_string()));
    }

    info!(class_id = %id, madrasa_id = %auth.madrasa_id, "Class deleted");

    Ok(StatusCode::NO_CONTENT)
}
