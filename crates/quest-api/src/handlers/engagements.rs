//! Engagement handlers
//!
//! Endpoints for toggling and reading engagements on problems and comments.

use axum::{
    extract::{Path, State},
    Json,
};
use quest_core::{EngagementKind, Snowflake};
use quest_service::{EngagementResponse, EngagementService};

use crate::extractors::{AuthUser, OptionalAuthUser};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

fn parse_target(target_id: &str) -> Result<Snowflake, ApiError> {
    target_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid target_id format"))
}

fn parse_kind(kind: &str) -> Result<EngagementKind, ApiError> {
    kind.parse()
        .map_err(|_| ApiError::invalid_path("Unknown engagement kind"))
}

/// Toggle the caller's engagement on a target
///
/// POST /engagement-targets/{target_id}/{kind}
///
/// Engages when no record exists, disengages when one does, and returns
/// the new state together with the reconciled counter value.
pub async fn toggle_engagement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((target_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<EngagementResponse>> {
    let target_id = parse_target(&target_id)?;
    let kind = parse_kind(&kind)?;

    let service = EngagementService::new(state.service_context());
    let response = service.toggle(target_id, auth.user_id, kind).await?;
    Ok(Json(response))
}

/// Read the engagement state of a target
///
/// GET /engagement-targets/{target_id}/{kind}
///
/// Works without authentication; `engaged` is false for anonymous callers.
pub async fn get_engagement(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path((target_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<EngagementResponse>> {
    let target_id = parse_target(&target_id)?;
    let kind = parse_kind(&kind)?;

    let service = EngagementService::new(state.service_context());
    let response = service.status(target_id, auth.user_id(), kind).await?;
    Ok(Json(response))
}
