//! Comment handlers
//!
//! Endpoints for comments on problems.

use axum::{
    extract::{Path, State},
    Json,
};
use quest_service::{CommentResponse, CommentService, CreateCommentRequest, PaginatedResponse};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// List comments on a problem, oldest first
///
/// GET /problems/{problem_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(problem_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CommentResponse>>> {
    let problem_id = problem_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid problem_id format"))?;

    let service = CommentService::new(state.service_context());
    let page = service.list(problem_id, pagination.into()).await?;
    Ok(Json(page))
}

/// Post comment on a problem
///
/// POST /problems/{problem_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(problem_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let problem_id = problem_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid problem_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.create(problem_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
