//! Problem service
//!
//! Handles problem submission, listing, editing and deletion. Edits never
//! touch counter columns; those are owned by the engagement toggle.

use quest_core::entities::Problem;
use quest_core::error::DomainError;
use quest_core::traits::PageQuery;
use quest_core::value_objects::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CreateProblemRequest, PaginatedResponse, ProblemResponse, UpdateProblemRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Problem service
pub struct ProblemService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProblemService<'a> {
    /// Create a new ProblemService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a new problem
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateProblemRequest,
    ) -> ServiceResult<ProblemResponse> {
        let problem = Problem::new(
            self.ctx.generate_id(),
            author_id,
            request.title,
            request.summary,
        );

        self.ctx.problem_repo().create(&problem).await?;

        info!(problem_id = %problem.id, author_id = %author_id, "Problem created");

        Ok(ProblemResponse::from(&problem))
    }

    /// Get a problem with its counters
    #[instrument(skip(self))]
    pub async fn get(&self, problem_id: Snowflake) -> ServiceResult<ProblemResponse> {
        let problem = self
            .ctx
            .problem_repo()
            .find_by_id(problem_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Problem", problem_id.to_string()))?;

        Ok(ProblemResponse::from(&problem))
    }

    /// List problems, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: PageQuery,
    ) -> ServiceResult<PaginatedResponse<ProblemResponse>> {
        let limit = query.limit.clamp(1, 100);
        let problems = self
            .ctx
            .problem_repo()
            .list(PageQuery { limit, ..query })
            .await?;

        let has_more = problems.len() as i64 == limit;
        let before = problems.last().map(|p| p.id.to_string());
        let after = problems.first().map(|p| p.id.to_string());
        let data = problems.iter().map(ProblemResponse::from).collect();

        Ok(PaginatedResponse::new(data, before, after, has_more, limit))
    }

    /// Edit a problem's title and summary (author only)
    ///
    /// The writable set stops at title and summary. Counter fields carried
    /// by a request simply have nowhere to go.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        problem_id: Snowflake,
        user_id: Snowflake,
        request: UpdateProblemRequest,
    ) -> ServiceResult<ProblemResponse> {
        let mut problem = self
            .ctx
            .problem_repo()
            .find_by_id(problem_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Problem", problem_id.to_string()))?;

        if !problem.is_author(user_id) {
            return Err(DomainError::NotProblemAuthor.into());
        }

        if let Some(title) = request.title {
            problem.set_title(title);
        }

        if let Some(summary) = request.summary {
            problem.set_summary(summary);
        }

        self.ctx.problem_repo().update(&problem).await?;

        info!(problem_id = %problem_id, "Problem updated");

        Ok(ProblemResponse::from(&problem))
    }

    /// Delete a problem with its comments and engagement records (author only)
    #[instrument(skip(self))]
    pub async fn delete(&self, problem_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let problem = self
            .ctx
            .problem_repo()
            .find_by_id(problem_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Problem", problem_id.to_string()))?;

        if !problem.is_author(user_id) {
            return Err(DomainError::NotProblemAuthor.into());
        }

        self.ctx.problem_repo().delete(problem_id).await?;

        info!(problem_id = %problem_id, "Problem deleted");

        Ok(())
    }
}
