//! Financial summary and report export routes.
//!
//! Exports assemble rows through the persistence layer, build a document in
//! the domain layer and hand it to the export service. The response carries
//! the artifact's metadata only.

use axum::{extract::{Query, State}, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use domain::models::attendance::TimeSlot;
use domain::models::finance::{FinancialSummaryResponse, LedgerFilter};
use domain::models::report::{
    attendance_register_document, build_register_grid, education_register_document,
    expense_document, income_document,
};
use domain::services::ExportFormat;
use persistence::repositories::{
    AttendanceRepository, EducationReportRepository, ExpenseRepository, IncomeRepository,
    StudentRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;
use crate::routes::attendance::month_bounds;
use crate::services::report_export::{ExportArtifact, ReportExportService};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct SummaryQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// GET /api/v1/reports/financial-summary
pub async fn financial_summary(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<FinancialSummaryResponse>, ApiError> {
    let total_income = IncomeRepository::new(state.pool.clone())
        .total(auth.madrasa_id, query.date_from, query.date_to)
        .await?;
    let total_expenses = ExpenseRepository::new(state.pool.clone())
        .total(auth.madrasa_id, query.date_from, query.date_to)
        .await?;

    Ok(Json(FinancialSummaryResponse {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LedgerExportRequest {
    pub format: ExportFormat,
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl LedgerExportRequest {
    fn filter(&self) -> LedgerFilter {
        LedgerFilter {
            entry_type: self.entry_type.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}

/// POST /api/v1/reports/export/income
pub async fn export_income(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<LedgerExportRequest>,
) -> Result<Json<ExportArtifact>, ApiError> {
    let filter = request.filter();
    let entries: Vec<_> = IncomeRepository::new(state.pool.clone())
        .list(auth.madrasa_id, &filter)
        .await?
        .into_iter()
        .map(|e| e.into_response())
        .collect();

    let service = ReportExportService::from_config(&state.config.reports);
    let document = income_document(service.organization_name(), &entries, &filter);
    let artifact = service.export(&document, request.format)?;

    info!(
        madrasa_id = %auth.madrasa_id,
        entries = entries.len(),
        file = %artifact.file_name,
        "Income report exported"
    );

    Ok(Json(artifact))
}

/// POST /api/v1/reports/export/expenses
pub async fn export_expenses(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<LedgerExportRequest>,
) -> Result<Json<ExportArtifact>, ApiError> {
    let filter = request.filter();
    let entries: Vec<_> = ExpenseRepository::new(state.pool.clone())
        .list(auth.madrasa_id, &filter)
        .await?
        .into_iter()
        .map(|e| e.into_response())
        .collect();

    let service = ReportExportService::from_config(&state.config.reports);
    let document = expense_document(service.organization_name(), &entries, &filter);
    let artifact = service.export(&document, request.format)?;

    info!(
        madrasa_id = %auth.madrasa_id,
        entries = entries.len(),
        file = %artifact.file_name,
        "Expense report exported"
    );

    Ok(Json(artifact))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterExportRequest {
    pub year: i32,
    pub month: u32,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub class_id: Option<Uuid>,
    pub format: ExportFormat,
}

/// POST /api/v1/reports/export/attendance-register
pub async fn export_attendance_register(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<RegisterExportRequest>,
) -> Result<Json<ExportArtifact>, ApiError> {
    let (first, last) = month_bounds(request.year, request.month)?;

    let names = StudentRepository::new(state.pool.clone())
        .list_names(auth.madrasa_id, request.class_id)
        .await?;

    let entities = AttendanceRepository::new(state.pool.clone())
        .range_records(
            auth.madrasa_id,
            first,
            last,
            request.time_slot,
            request.class_id,
        )
        .await?;

    let mut records = Vec::with_capacity(entities.len());
    for entity in entities {
        records.push((entity.student_id, entity.date, entity.status()?));
    }

    let days: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
    let grid = build_register_grid(request.time_slot, &names, &days, &records);

    let service = ReportExportService::from_config(&state.config.reports);
    let document = attendance_register_document(service.organization_name(), &grid, auth.locale);
    let artifact = service.export(&document, request.format)?;

    info!(
        madrasa_id = %auth.madrasa_id,
        year = request.year,
        month = request.month,
        file = %artifact.file_name,
        "Attendance register exported"
    );

    Ok(Json(artifact))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EducationExportRequest {
    pub year: i32,
    pub month: u32,
    pub format: ExportFormat,
}

/// POST /api/v1/reports/export/education-register
pub async fn export_education_register(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<EducationExportRequest>,
) -> Result<Json<ExportArtifact>, ApiError> {
    let (first, last) = month_bounds(request.year, request.month)?;

    let entries: Vec<_> = EducationReportRepository::new(state.pool.clone())
        .range_records(auth.madrasa_id, first, last)
        .await?
        .into_iter()
        .map(|e| e.into_response())
        .collect();

    let student_names = StudentRepository::new(state.pool.clone())
        .list_names(auth.madrasa_id, None)
        .await?
        .into_iter()
        .collect();

    let service = ReportExportService::from_config(&state.config.reports);
    let document = education_register_document(service.organization_name(), &student_names, &entries);
    let artifact = service.export(&document, request.format)?;

    info!(
        madrasa_id = %auth.madrasa_id,
        year = request.year,
        month = request.month,
        file = %artifact.file_name,
        "Education register exported"
    );

    Ok(Json(artifact))
}
