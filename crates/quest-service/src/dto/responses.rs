//! Response DTOs returned by the API handlers.
//!
//! Everything here serializes to JSON. Snowflake ids travel as strings so
//! JavaScript clients never hit the 2^53 integer ceiling.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Problem with its denormalized engagement counters
#[derive(Debug, Clone, Serialize)]
pub struct ProblemResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub summary: String,
    pub upvotes: i64,
    pub investors: i64,
    pub builders: i64,
    pub followers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment on a problem
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub problem_id: String,
    pub author_id: String,
    pub body: String,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a toggle or a status read
///
/// `count` is the freshly recomputed live count for the target and kind,
/// never a stale stored value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngagementResponse {
    pub engaged: bool,
    pub count: i64,
}

/// One page of rows plus the cursors needed to fetch the neighbours.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        data: Vec<T>,
        before: Option<String>,
        after: Option<String>,
        has_more: bool,
        limit: i64,
    ) -> Self {
        let pagination = PaginationMeta {
            before,
            after,
            has_more,
            limit,
        };
        Self { data, pagination }
    }
}

/// Cursor metadata attached to every paginated response. Absent cursors are
/// omitted from the JSON rather than serialized as `null`.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

/// Liveness probe body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}

/// Readiness probe body, with one entry per checked dependency
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn ready(database_up: bool) -> Self {
        Self {
            status: if database_up { "ready" } else { "not_ready" },
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_up { "healthy" } else { "unhealthy" },
            },
        }
    }
}
