//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quest_core::entities::Comment;
use quest_core::traits::{CommentRepository, PageQuery, RepoResult};
use quest_core::value_objects::Snowflake;

use crate::mappers::CommentInsert;
use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, problem_id, author_id, body, upvotes, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_problem(
        &self,
        problem_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Vec<Comment>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch comments before cursor
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, problem_id, author_id, body, upvotes, created_at, updated_at
                    FROM comments
                    WHERE problem_id = $1 AND id < $2
                    ORDER BY id ASC
                    LIMIT $3
                    ",
                )
                .bind(problem_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch comments after cursor (scrolling down the thread)
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, problem_id, author_id, body, upvotes, created_at, updated_at
                    FROM comments
                    WHERE problem_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    ",
                )
                .bind(problem_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch the thread from the top (no cursor)
                sqlx::query_as::<_, CommentModel>(
                    r"
                    SELECT id, problem_id, author_id, body, upvotes, created_at, updated_at
                    FROM comments
                    WHERE problem_id = $1
                    ORDER BY id ASC
                    LIMIT $2
                    ",
                )
                .bind(problem_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        sqlx::query(
            r"
            INSERT INTO comments (id, problem_id, author_id, body)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(insert.id)
        .bind(insert.problem_id)
        .bind(insert.author_id)
        .bind(insert.body)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // No foreign key covers engagements, so remove them in the same
        // transaction as the comment row.
        sqlx::query(
            r"
            DELETE FROM engagements WHERE target_id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
