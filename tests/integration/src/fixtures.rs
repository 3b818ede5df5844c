//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use quest_core::Snowflake;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter component of synthetic user IDs
static USER_COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Generate a user ID that stays unique across test runs
///
/// Engagement rows are keyed by user ID and persist between runs when
/// tests target a shared database, so the ID carries a timestamp.
pub fn unique_user_id() -> Snowflake {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(1);
    Snowflake::new((millis << 16) | USER_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Create problem request
#[derive(Debug, Serialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub summary: String,
}

impl CreateProblemRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Problem {suffix}"),
            summary: "Something worth solving".to_string(),
        }
    }
}

/// Update problem request
#[derive(Debug, Default, Serialize)]
pub struct UpdateProblemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl UpdateProblemRequest {
    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            summary: None,
        }
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

impl CreateCommentRequest {
    pub fn simple(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

/// Problem response
#[derive(Debug, Deserialize)]
pub struct ProblemResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub summary: String,
    pub upvotes: i64,
    pub investors: i64,
    pub builders: i64,
    pub followers: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub problem_id: String,
    pub author_id: String,
    pub body: String,
    pub upvotes: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Engagement state response
#[derive(Debug, Deserialize)]
pub struct EngagementResponse {
    pub engaged: bool,
    pub count: i64,
}

/// Paginated list response
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    pub before: Option<String>,
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
