//! Problem handlers
//!
//! Endpoints for problem operations.

use axum::{
    extract::{Path, State},
    Json,
};
use quest_service::{
    CreateProblemRequest, PaginatedResponse, ProblemResponse, ProblemService, UpdateProblemRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List problems, newest first
///
/// GET /problems
pub async fn list_problems(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ProblemResponse>>> {
    let service = ProblemService::new(state.service_context());
    let page = service.list(pagination.into()).await?;
    Ok(Json(page))
}

/// Submit problem
///
/// POST /problems
pub async fn create_problem(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateProblemRequest>,
) -> ApiResult<Created<Json<ProblemResponse>>> {
    let service = ProblemService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get problem by ID
///
/// GET /problems/{problem_id}
pub async fn get_problem(
    State(state): State<AppState>,
    Path(problem_id): Path<String>,
) -> ApiResult<Json<ProblemResponse>> {
    let problem_id = problem_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid problem_id format"))?;

    let service = ProblemService::new(state.service_context());
    let response = service.get(problem_id).await?;
    Ok(Json(response))
}

/// Edit problem title or summary (author only)
///
/// PATCH /problems/{problem_id}
pub async fn update_problem(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(problem_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProblemRequest>,
) -> ApiResult<Json<ProblemResponse>> {
    let problem_id = problem_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid problem_id format"))?;

    let service = ProblemService::new(state.service_context());
    let response = service.update(problem_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete problem (author only)
///
/// DELETE /problems/{problem_id}
pub async fn delete_problem(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(problem_id): Path<String>,
) -> ApiResult<NoContent> {
    let problem_id = problem_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid problem_id format"))?;

    let service = ProblemService::new(state.service_context());
    service.delete(problem_id, auth.user_id).await?;
    Ok(NoContent)
}
