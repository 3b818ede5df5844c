//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, EngagementRecord, Problem, ToggleOutcome};
use crate::error::DomainError;
use crate::value_objects::{EngagementKind, Snowflake, TargetKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Pagination options for listing queries (cursor over snowflake ids)
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

// ============================================================================
// Problem Repository
// ============================================================================

#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// Find problem by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Problem>>;

    /// List problems, newest first, with pagination
    async fn list(&self, query: PageQuery) -> RepoResult<Vec<Problem>>;

    /// Create a new problem
    async fn create(&self, problem: &Problem) -> RepoResult<()>;

    /// Update title and summary
    ///
    /// The writable set deliberately excludes every counter column; those
    /// belong to the engagement toggle alone.
    async fn update(&self, problem: &Problem) -> RepoResult<()>;

    /// Delete a problem together with its comments and all engagement
    /// records attached to any of them, in one transaction
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// List comments on a problem, oldest first, with pagination
    async fn find_by_problem(
        &self,
        problem_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment and its engagement records in one transaction
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Engagement Repository
// ============================================================================

#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Atomically flip the caller's engagement with a target and
    /// reconcile the target's counter in the same transaction.
    ///
    /// The counter is recomputed as `COUNT(*)` over the live record set,
    /// never adjusted from its previous value, so a drifted counter heals
    /// on the next toggle. Unique-constraint and serialization conflicts
    /// surface as a retryable [`DomainError::EngagementConflict`].
    async fn toggle(
        &self,
        target_id: Snowflake,
        user_id: Snowflake,
        kind: EngagementKind,
    ) -> RepoResult<ToggleOutcome>;

    /// Find one engagement record
    async fn find(
        &self,
        target_id: Snowflake,
        user_id: Snowflake,
        kind: EngagementKind,
    ) -> RepoResult<Option<EngagementRecord>>;

    /// Live `COUNT(*)` of records for a target and kind; the oracle the
    /// stored counter must agree with
    async fn count(&self, target_id: Snowflake, kind: EngagementKind) -> RepoResult<i64>;

    /// Resolve which table a target id lives in, if any
    async fn resolve_target(&self, target_id: Snowflake) -> RepoResult<Option<TargetKind>>;
}
