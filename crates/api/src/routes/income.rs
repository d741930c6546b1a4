//! Income (donation) routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::finance::{IncomeResponse, LedgerFilter, UpsertIncomeRequest};
use persistence::repositories::IncomeRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// GET /api/v1/income
pub async fn list_income(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<LedgerFilter>,
) -> Result<Json<Vec<IncomeResponse>>, ApiError> {
    let repo = IncomeRepository::new(state.pool.clone());
    let entries = repo.list(auth.madrasa_id, &filter).await?;

    Ok(Json(
        entries.into_iter().map(|e| e.into_response()).collect(),
    ))
}

/// POST /api/v1/income
pub async fn create_income(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertIncomeRequest>,
) -> Result<(StatusCode, Json<IncomeResponse>), ApiError> {
    request.validate()?;

    let repo = IncomeRepository::new(state.pool.clone());
    let entry = repo
        .create(auth.madrasa_id, auth.user_id, &request)
        .await?;

    info!(
        income_id = %entry.id,
        amount = entry.amount,
        madrasa_id = %auth.madrasa_id,
        "Income recorded"
    );

    Ok((StatusCode::CREATED, Json(entry.into_response())))
}

/// PUT /api/v1/income/:id
pub async fn update_income(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertIncomeRequest>,
) -> Result<Json<IncomeResponse>, ApiError> {
    request.validate()?;

    let repo = IncomeRepository::new(state.pool.clone());
    let entry = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Income entry not found".to_string()))?;

    Ok(Json(entry.into_response()))
}

/// DELETE /api/v1/income/:id
pub async fn delete_income(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = IncomeRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Income entry not found".to_string()));
    }

    info!(income_id = %id, madrasa_id = %auth.madrasa_id, "Income deleted");

    Ok(StatusCode::NO_CONTENT)
}
