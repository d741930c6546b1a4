//! Expense routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::finance::{ExpenseResponse, LedgerFilter, UpsertExpenseRequest};
use persistence::repositories::ExpenseRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// GET /api/v1/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<LedgerFilter>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());
    let entries = repo.list(auth.madrasa_id, &filter).await?;

    Ok(Json(
        entries.into_iter().map(|e| e.into_response()).collect(),
    ))
}

/// POST /api/v1/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    request.validate()?;

    let repo = ExpenseRepository::new(state.pool.clone());
    let entry = repo
        .create(auth.madrasa_id, auth.user_id, &request)
        .await?;

    info!(
        expense_id = %entry.id,
        amount = entry.amount,
        madrasa_id = %auth.madrasa_id,
        "Expense recorded"
    );

    Ok((StatusCode::CREATED, Json(entry.into_response())))
}

/// PUT /api/v1/expenses/:id
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    request.validate()?;

    let repo = ExpenseRepository::new(state.pool.clone());
    let entry = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Expense not found".to_string()))?;

    Ok(Json(entry.into_response()))
}

/// DELETE /api/v1/expenses/:id
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Expense not found".to_string()));
    }

    info!(expense_id = %id, madrasa_id = %auth.madrasa_id, "Expense deleted");

    Ok(StatusCode::NO_CONTENT)
}
