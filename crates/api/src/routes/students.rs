//! Student CRUD routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::student::{
    ListStudentsQuery, StudentListResponse, StudentResponse, UpsertStudentRequest,
};
use persistence::repositories::StudentRepository;
use shared::pagination::{PageInfo, PageQuery};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthContext;

/// GET /api/v1/students
pub async fn list_students(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListStudentsQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<StudentListResponse>, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let entities = repo.list(auth.madrasa_id, &query, &page).await?;
    let total = repo.count(auth.madrasa_id, &query).await?;

    let students = entities
        .into_iter()
        .map(|s| s.into_response().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(StudentListResponse {
        students,
        page_info: PageInfo::new(page.page(), page.per_page(), total),
    }))
}

/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpsertStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    request.validate()?;

    let repo = StudentRepository::new(state.pool.clone());
    let student = repo.create(auth.madrasa_id, &request).await?;

    info!(
        student_id = %student.id,
        madrasa_id = %auth.madrasa_id,
        "Student created"
    );

    Ok((StatusCode::CREATED, Json(student.into_response()?)))
}

/// GET /api/v1/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let student = repo
        .find_by_id(auth.madrasa_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(Json(student.into_response()?))
}

/// PUT /api/v1/students/:id
pub async fn update_student(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpsertStudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    request.validate()?;

    let repo = StudentRepository::new(state.pool.clone());
    let student = repo
        .update(auth.madrasa_id, id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    info!(student_id = %id, madrasa_id = %auth.madrasa_id, "Student updated");

    Ok(Json(student.into_response()?))
}

/// DELETE /api/v1/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.madrasa_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Student not found".to_string()));
    }

    info!(student_id = %id, madrasa_id = %auth.madrasa_id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}
