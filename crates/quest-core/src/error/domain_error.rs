//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EngagementKind, Snowflake, TargetKind};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Problem not found: {0}")]
    ProblemNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Engagement target not found: {0}")]
    TargetNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Engagement kind '{kind}' is not supported on a {target}")]
    UnsupportedEngagement {
        target: TargetKind,
        kind: EngagementKind,
    },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not problem author")]
    NotProblemAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors (retryable)
    // =========================================================================
    /// A concurrent transaction collided on the engagement uniqueness
    /// constraint, or the store reported a serialization failure or
    /// deadlock. Retrying the whole toggle is always safe.
    #[error("Concurrent engagement conflict: {0}")]
    EngagementConflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProblemNotFound(_) => "UNKNOWN_PROBLEM",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::TargetNotFound(_) => "UNKNOWN_TARGET",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnsupportedEngagement { .. } => "UNSUPPORTED_ENGAGEMENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotProblemAuthor => "NOT_PROBLEM_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::EngagementConflict(_) => "ENGAGEMENT_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProblemNotFound(_) | Self::CommentNotFound(_) | Self::TargetNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::UnsupportedEngagement { .. }
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotProblemAuthor | Self::NotCommentAuthor)
    }

    /// Check if this error is safe to resolve by rerunning the whole
    /// transaction (bounded retry in the service layer)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EngagementConflict(_))
    }
}
