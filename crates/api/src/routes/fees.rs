//! Fee routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::finance::{FeeResponse, UpsertFeeRequest};
use persistence::repositories::FeeRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListFeesQuery {
    pub student_id: Option<Uuid>,
}

/// GET /api/v1/fees
pub async fn list_fees(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListFeesQuery>,
) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    let repo = FeeRepository::new(state.pool.clone());
    let fees = repo.list(auth.madrasa_id, query.student_id).await?;

    fees.into_iter()
        .map(|f| f.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// POST /api/v1/fees
pub async fn create_fee(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertFeeRequest>,
) -> Result<(StatusCode, Json<FeeResponse>), ApiError> {
    request.validate()?;

    let repo = FeeRepository::new(state.pool.clone());
    let fee = repo.create(auth.madrasa_id, &request).await?;

    info!(
        fee_id = %fee.id,
        amount = fee.amount,
        madrasa_id = %auth.madrasa_id,
        "Fee created"
    );

    Ok((StatusCode::CREATED, Json(fee.into_response()?)))
}

/// PUT /api/v1/fees/:id
pub async fn update_fee(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertFeeRequest>,
) -> Result<Json<FeeResponse>, ApiError> {
    request.validate()?;

    let repo = FeeRepository::new(state.pool.clone());
    let fee = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Fee not found".to_string()))?;

    Ok(Json(fee.into_response()?))
}

/// DELETE /api/v1/fees/:id
pub async fn delete_fee(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = FeeRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Fee not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
