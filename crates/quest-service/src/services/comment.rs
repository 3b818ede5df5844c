//! Comment service
//!
//! Handles comments attached to problems.

use quest_core::entities::Comment;
use quest_core::traits::PageQuery;
use quest_core::value_objects::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, PaginatedResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment on a problem
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        problem_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        // The comment must land on an existing problem
        self.ctx
            .problem_repo()
            .find_by_id(problem_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Problem", problem_id.to_string()))?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            problem_id,
            author_id,
            request.body,
        );

        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            problem_id = %problem_id,
            author_id = %author_id,
            "Comment created"
        );

        Ok(CommentResponse::from(&comment))
    }

    /// List comments on a problem, oldest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        problem_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CommentResponse>> {
        self.ctx
            .problem_repo()
            .find_by_id(problem_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Problem", problem_id.to_string()))?;

        let limit = query.limit.clamp(1, 100);
        let comments = self
            .ctx
            .comment_repo()
            .find_by_problem(problem_id, PageQuery { limit, ..query })
            .await?;

        let has_more = comments.len() as i64 == limit;
        let before = comments.first().map(|c| c.id.to_string());
        let after = comments.last().map(|c| c.id.to_string());
        let data = comments.iter().map(CommentResponse::from).collect();

        Ok(PaginatedResponse::new(data, before, after, has_more, limit))
    }
}
