//! PostgreSQL implementation of ProblemRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quest_core::entities::Problem;
use quest_core::traits::{PageQuery, ProblemRepository, RepoResult};
use quest_core::value_objects::Snowflake;

use crate::mappers::{ProblemInsert, ProblemUpdate};
use crate::models::ProblemModel;

use super::error::{map_db_error, problem_not_found};

/// PostgreSQL implementation of ProblemRepository
#[derive(Clone)]
pub struct PgProblemRepository {
    pool: PgPool,
}

impl PgProblemRepository {
    /// Create a new PgProblemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProblemRepository for PgProblemRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Problem>> {
        let result = sqlx::query_as::<_, ProblemModel>(
            r"
            SELECT id, author_id, title, summary, upvotes, investors, builders, followers, created_at, updated_at
            FROM problems
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Problem::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: PageQuery) -> RepoResult<Vec<Problem>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch problems before cursor (scrolling down the feed)
                sqlx::query_as::<_, ProblemModel>(
                    r"
                    SELECT id, author_id, title, summary, upvotes, investors, builders, followers, created_at, updated_at
                    FROM problems
                    WHERE id < $1
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch problems after cursor (newer entries)
                sqlx::query_as::<_, ProblemModel>(
                    r"
                    SELECT id, author_id, title, summary, upvotes, investors, builders, followers, created_at, updated_at
                    FROM problems
                    WHERE id > $1
                    ORDER BY id ASC
                    LIMIT $2
                    ",
                )
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch latest problems (no cursor)
                sqlx::query_as::<_, ProblemModel>(
                    r"
                    SELECT id, author_id, title, summary, upvotes, investors, builders, followers, created_at, updated_at
                    FROM problems
                    ORDER BY id DESC
                    LIMIT $1
                    ",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Problem::from).collect())
    }

    #[instrument(skip(self, problem))]
    async fn create(&self, problem: &Problem) -> RepoResult<()> {
        let insert = ProblemInsert::new(problem);

        sqlx::query(
            r"
            INSERT INTO problems (id, author_id, title, summary)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.summary)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, problem))]
    async fn update(&self, problem: &Problem) -> RepoResult<()> {
        let update = ProblemUpdate::new(problem);

        // Writable set is title and summary; counter columns are owned by
        // the engagement toggle transaction.
        let result = sqlx::query(
            r"
            UPDATE problems
            SET title = $2, summary = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.title)
        .bind(update.summary)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(problem_not_found(problem.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Engagements carry no foreign key (target_id spans two tables), so
        // purge them for the problem and its comments before the cascade
        // removes the comment rows.
        sqlx::query(
            r"
            DELETE FROM engagements
            WHERE target_id = $1
               OR target_id IN (SELECT id FROM comments WHERE problem_id = $1)
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            DELETE FROM problems WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(problem_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
