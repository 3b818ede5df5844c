//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//!
//! None of these carry counter fields. Counters are recomputed by the toggle
//! transaction and are not part of any writable request surface.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Problem Requests
// ============================================================================

/// Create problem request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Summary must be 1-2000 characters"))]
    pub summary: String,
}

/// Update problem request
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Summary must be 1-2000 characters"))]
    pub summary: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub body: String,
}
