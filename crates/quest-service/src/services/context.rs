//! Dependency container handed to every service.

use std::sync::Arc;

use quest_common::auth::JwtService;
use quest_common::config::EngagementConfig;
use quest_core::traits::{CommentRepository, EngagementRepository, ProblemRepository};
use quest_core::{Snowflake, SnowflakeGenerator};
use quest_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Shared handles for the application services: repositories, the JWT
/// service, the id generator, and the toggle retry policy.
///
/// Cloning is cheap; everything inside is an [`Arc`] or a pooled handle.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    problem_repo: Arc<dyn ProblemRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    engagement_repo: Arc<dyn EngagementRepository>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    engagement_config: EngagementConfig,
}

impl ServiceContext {
    /// Raw connection pool, for health probes.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn problem_repo(&self) -> &dyn ProblemRepository {
        self.problem_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn engagement_repo(&self) -> &dyn EngagementRepository {
        self.engagement_repo.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Mint a fresh id for a new row.
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Retry policy for the engagement toggle.
    pub fn engagement_config(&self) -> &EngagementConfig {
        &self.engagement_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("engagement_config", &self.engagement_config)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`ServiceContext`] one dependency at a time.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    problem_repo: Option<Arc<dyn ProblemRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    engagement_repo: Option<Arc<dyn EngagementRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    engagement_config: Option<EngagementConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn problem_repo(mut self, repo: Arc<dyn ProblemRepository>) -> Self {
        self.problem_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn engagement_repo(mut self, repo: Arc<dyn EngagementRepository>) -> Self {
        self.engagement_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn engagement_config(mut self, config: EngagementConfig) -> Self {
        self.engagement_config = Some(config);
        self
    }

    /// Finish the build.
    ///
    /// # Errors
    /// Everything except `engagement_config` is mandatory; the first missing
    /// dependency is reported by name.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: require(self.pool, "pool")?,
            problem_repo: require(self.problem_repo, "problem_repo")?,
            comment_repo: require(self.comment_repo, "comment_repo")?,
            engagement_repo: require(self.engagement_repo, "engagement_repo")?,
            jwt_service: require(self.jwt_service, "jwt_service")?,
            snowflake_generator: require(self.snowflake_generator, "snowflake_generator")?,
            engagement_config: self.engagement_config.unwrap_or_default(),
        })
    }
}

fn require<T>(slot: Option<T>, name: &'static str) -> ServiceResult<T> {
    slot.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}
