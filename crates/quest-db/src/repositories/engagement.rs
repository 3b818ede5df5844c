//! PostgreSQL implementation of EngagementRepository
//!
//! The toggle is a single transaction that locks the target row, flips the
//! caller's ledger row, recomputes the counter with `COUNT(*)` and writes
//! the result back. The stored counter is never incremented or decremented,
//! so a drifted value is overwritten with the truth on the next toggle.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use quest_core::entities::{EngagementRecord, ToggleOutcome};
use quest_core::error::DomainError;
use quest_core::traits::{EngagementRepository, RepoResult};
use quest_core::value_objects::{EngagementKind, Snowflake, TargetKind};

use crate::models::EngagementModel;

use super::error::{map_db_error, map_toggle_error, target_not_found};

/// PostgreSQL implementation of EngagementRepository
#[derive(Clone)]
pub struct PgEngagementRepository {
    pool: PgPool,
}

impl PgEngagementRepository {
    /// Create a new PgEngagementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock the target row and report which table it lives in.
///
/// Snowflake ids never collide across tables, so probing problems first and
/// comments second resolves the id unambiguously. The `FOR UPDATE` lock
/// serializes concurrent toggles on the same target for the rest of the
/// transaction.
async fn lock_target(
    tx: &mut Transaction<'_, Postgres>,
    target_id: i64,
) -> RepoResult<Option<TargetKind>> {
    let hit = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM problems WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(target_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_toggle_error)?;

    if hit.is_some() {
        return Ok(Some(TargetKind::Problem));
    }

    let hit = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM comments WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(target_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_toggle_error)?;

    Ok(hit.map(|_| TargetKind::Comment))
}

#[async_trait]
impl EngagementRepository for PgEngagementRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        target_id: Snowflake,
        user_id: Snowflake,
        kind: EngagementKind,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_toggle_error)?;

        // Lock before reading anything. A count taken without the lock can
        // be stale by the time the counter write runs; behind the lock the
        // count and the write see the same record set.
        let Some(target) = lock_target(&mut tx, target_id.into_inner()).await? else {
            return Err(target_not_found(target_id));
        };

        // Checked after resolution so an unknown id reports not-found
        // rather than unsupported.
        if !target.supports(kind) {
            return Err(DomainError::UnsupportedEngagement { target, kind });
        }

        let engaged_before = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM engagements
                WHERE target_id = $1 AND user_id = $2 AND kind = $3
            )
            "#,
        )
        .bind(target_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_toggle_error)?;

        if engaged_before {
            sqlx::query(
                r#"
                DELETE FROM engagements
                WHERE target_id = $1 AND user_id = $2 AND kind = $3
                "#,
            )
            .bind(target_id.into_inner())
            .bind(user_id.into_inner())
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_toggle_error)?;
        } else {
            // The composite primary key backstops the row lock: if another
            // transaction slips the same row in first, this surfaces as a
            // unique violation and the caller retries the whole toggle.
            sqlx::query(
                r#"
                INSERT INTO engagements (target_id, user_id, kind)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(target_id.into_inner())
            .bind(user_id.into_inner())
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_toggle_error)?;
        }

        // Recompute instead of adjusting the stored value. Whatever the
        // counter held before, it now matches the record set.
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM engagements
            WHERE target_id = $1 AND kind = $2
            "#,
        )
        .bind(target_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_toggle_error)?;

        // Identifiers come from &'static str lookup tables on TargetKind
        // and EngagementKind; every runtime value is bound.
        let statement = format!(
            "UPDATE {} SET {} = $2, updated_at = NOW() WHERE id = $1",
            target.table(),
            kind.counter_column(),
        );
        sqlx::query(&statement)
            .bind(target_id.into_inner())
            .bind(count)
            .execute(&mut *tx)
            .await
            .map_err(map_toggle_error)?;

        tx.commit().await.map_err(map_toggle_error)?;

        Ok(ToggleOutcome::new(!engaged_before, count))
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        target_id: Snowflake,
        user_id: Snowflake,
        kind: EngagementKind,
    ) -> RepoResult<Option<EngagementRecord>> {
        let result = sqlx::query_as::<_, EngagementModel>(
            r#"
            SELECT target_id, user_id, kind, created_at
            FROM engagements
            WHERE target_id = $1 AND user_id = $2 AND kind = $3
            "#,
        )
        .bind(target_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EngagementRecord::from))
    }

    #[instrument(skip(self))]
    async fn count(&self, target_id: Snowflake, kind: EngagementKind) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM engagements
            WHERE target_id = $1 AND kind = $2
            "#,
        )
        .bind(target_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn resolve_target(&self, target_id: Snowflake) -> RepoResult<Option<TargetKind>> {
        let hit = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM problems WHERE id = $1
            "#,
        )
        .bind(target_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if hit.is_some() {
            return Ok(Some(TargetKind::Problem));
        }

        let hit = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM comments WHERE id = $1
            "#,
        )
        .bind(target_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(hit.map(|_| TargetKind::Comment))
    }
}
