//! Extension program routes: listings, map feed, detail, and CRUD.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::form::FormData;
use crate::models::project::{MapProject, Project, ProgramForm, ProjectInput, ProjectSummary};
use crate::services::project as project_service;
use crate::AppState;

/// GET /main-campus — id, title and leader of every program.
pub async fn summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectSummary>>, AppError> {
    let programs = project_service::list_summaries(&state.db).await?;
    Ok(Json(programs))
}

/// GET /extension-program-management — every program with all fields.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let programs = project_service::list_all(&state.db).await?;
    Ok(Json(programs))
}

/// GET /api/projects — map markers for programs with coordinates.
pub async fn locations(State(state): State<AppState>) -> Result<Json<Vec<MapProject>>, AppError> {
    let projects = project_service::list_located(&state.db).await?;
    Ok(Json(projects))
}

/// POST /add-program — create a program; at least one SDG is required.
pub async fn create(
    State(state): State<AppState>,
    FormData(form): FormData<ProgramForm>,
) -> Result<Json<ApiResponse>, AppError> {
    form.validate()?;
    let input = ProjectInput::try_from(form)?;
    project_service::create(&state.db, &input).await?;
    Ok(ApiResponse::success("Program added successfully"))
}

/// GET /get-program/{id} — program for the edit form, SDG list normalized.
pub async fn get_for_edit(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Project>, AppError> {
    let project = project_service::find_by_id(&state.db, id).await?;
    Ok(Json(project.with_normalized_sdg()))
}

/// GET /project-details/{id} — program as stored.
pub async fn details(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Project>, AppError> {
    let project = project_service::find_by_id(&state.db, id).await?;
    Ok(Json(project))
}

/// PUT /edit-program/{id} — set only the fields present in the form.
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    FormData(form): FormData<ProgramForm>,
) -> Result<Json<ApiResponse>, AppError> {
    let input = ProjectInput::try_from(form)?;
    project_service::update(&state.db, id, &input).await?;
    Ok(ApiResponse::success("Program updated successfully"))
}

/// DELETE /delete-program/{id}
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<ApiResponse>, AppError> {
    project_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success("Program deleted successfully"))
}
