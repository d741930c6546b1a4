//! Education report (hifz progress) routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::education::{
    EducationReportResponse, ListEducationReportsQuery, UpsertEducationReportRequest,
};
use persistence::repositories::EducationReportRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// GET /api/v1/education-reports
pub async fn list_reports(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListEducationReportsQuery>,
) -> Result<Json<Vec<EducationReportResponse>>, ApiError> {
    let repo = EducationReportRepository::new(state.pool.clone());
    let reports = repo.list(auth.madrasa_id, &query).await?;

    Ok(Json(
        reports.into_iter().map(|r| r.into_response()).collect(),
    ))
}

/// POST /api/v1/education-reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertEducationReportRequest>,
) -> Result<(StatusCode, Json<EducationReportResponse>), ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation(
            "Report must record at least one progress field".to_string(),
        ));
    }
    let student_id = request
        .student_id
        .ok_or_else(|| ApiError::Validation("Student id is required".to_string()))?;

    let repo = EducationReportRepository::new(state.pool.clone());
    let report = repo.create(auth.madrasa_id, student_id, &request).await?;

    info!(
        report_id = %report.id,
        student_id = %student_id,
        date = %request.date,
        madrasa_id = %auth.madrasa_id,
        "Education report created"
    );

    Ok((StatusCode::CREATED, Json(report.into_response())))
}

/// PUT /api/v1/education-reports/:id
pub async fn update_report(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertEducationReportRequest>,
) -> Result<Json<EducationReportResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation(
            "Report must record at least one progress field".to_string(),
        ));
    }

    let repo = EducationReportRepository::new(state.pool.clone());
    let report = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Education report not found".to_string()))?;

    Ok(Json(report.into_response()))
}

/// DELETE /api/v1/education-reports/:id
pub async fn delete_report(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EducationReportRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Education report not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
