//! Error handling utilities for repositories

use quest_core::error::DomainError;
use quest_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// SQLSTATE for a serialization failure
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE for a detected deadlock
const DEADLOCK_DETECTED: &str = "40P01";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Convert errors raised inside the toggle transaction.
///
/// Unique-key collisions on the engagement primary key, serialization
/// failures and deadlocks all mean two toggles raced; the whole transaction
/// is safe to run again, so they map to the retryable conflict variant.
pub fn map_toggle_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        let retryable = db_err.is_unique_violation()
            || matches!(
                db_err.code().as_deref(),
                Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
            );
        if retryable {
            return DomainError::EngagementConflict(db_err.to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "problem not found" error
pub fn problem_not_found(id: Snowflake) -> DomainError {
    DomainError::ProblemNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "target not found" error
pub fn target_not_found(id: Snowflake) -> DomainError {
    DomainError::TargetNotFound(id)
}
