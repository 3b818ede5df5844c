//! Route tables, mounted under `/api/v1`.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{comments, engagements, health, problems};
use crate::state::AppState;

/// Everything that lives behind the API middleware stack.
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", problem_routes().merge(engagement_routes()))
}

/// Probe routes, mounted at the root so they skip the API middleware.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn problem_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/problems",
            get(problems::list_problems).post(problems::create_problem),
        )
        .route(
            "/problems/:problem_id",
            get(problems::get_problem)
                .patch(problems::update_problem)
                .delete(problems::delete_problem),
        )
        .route(
            "/problems/:problem_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

/// A target is addressed by bare ID; snowflakes are unique across
/// problems and comments so the path needs no type segment.
fn engagement_routes() -> Router<AppState> {
    Router::new().route(
        "/engagement-targets/:target_id/:kind",
        post(engagements::toggle_engagement).get(engagements::get_engagement),
    )
}
