//! Engagement service
//!
//! Drives the atomic toggle transaction with a bounded retry loop for
//! retryable conflicts, and serves the read path for engagement status.

use std::time::Duration;

use quest_core::error::DomainError;
use quest_core::value_objects::{EngagementKind, Snowflake};
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::dto::EngagementResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Upper bound on the exponential backoff shift
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's engagement with a target
    ///
    /// Runs the toggle transaction, retrying up to the configured number of
    /// attempts when it fails with a retryable conflict. All other errors
    /// propagate immediately; an exhausted retry budget surfaces the last
    /// conflict as a 409.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        target_id: Snowflake,
        user_id: Snowflake,
        kind: EngagementKind,
    ) -> ServiceResult<EngagementResponse> {
        let config = self.ctx.engagement_config();
        let mut attempt = 1u32;

        let outcome = loop {
            match self
                .ctx
                .engagement_repo()
                .toggle(target_id, user_id, kind)
                .await
            {
                Ok(outcome) => break outcome,
                Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                    warn!(
                        target_id = %target_id,
                        user_id = %user_id,
                        kind = %kind,
                        attempt,
                        "Toggle conflict, retrying"
                    );
                    tokio::time::sleep(backoff_delay(config.backoff_ms, attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        info!(
            target_id = %target_id,
            user_id = %user_id,
            kind = %kind,
            engaged = outcome.engaged,
            count = outcome.count,
            "Engagement toggled"
        );

        Ok(EngagementResponse::from(outcome))
    }

    /// Read the engagement status of a target
    ///
    /// `engaged` reflects the given user when present and is false for
    /// anonymous callers. `count` is the live record count, the oracle the
    /// stored counter is reconciled against.
    #[instrument(skip(self))]
    pub async fn status(
        &self,
        target_id: Snowflake,
        user_id: Option<Snowflake>,
        kind: EngagementKind,
    ) -> ServiceResult<EngagementResponse> {
        let target = self
            .ctx
            .engagement_repo()
            .resolve_target(target_id)
            .await?
            .ok_or(DomainError::TargetNotFound(target_id))?;

        if !target.supports(kind) {
            return Err(DomainError::UnsupportedEngagement { target, kind }.into());
        }

        let count = self.ctx.engagement_repo().count(target_id, kind).await?;

        let engaged = match user_id {
            Some(user_id) => self
                .ctx
                .engagement_repo()
                .find(target_id, user_id, kind)
                .await?
                .is_some(),
            None => false,
        };

        Ok(EngagementResponse { engaged, count })
    }
}

/// Exponential backoff with jitter: `base << (attempt - 1)` capped at
/// `MAX_BACKOFF_SHIFT` doublings, plus up to half of that again at random.
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
    let base = base_ms.saturating_mul(1 << shift);
    let jitter = rand::thread_rng().gen_range(0..=base / 2);
    Duration::from_millis(base + jitter)
}
