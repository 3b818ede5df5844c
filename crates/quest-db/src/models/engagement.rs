//! Engagement database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for engagements table.
///
/// `(target_id, user_id, kind)` is the primary key, so one user can hold at
/// most one engagement of a given kind on a given target.
#[derive(Debug, Clone, FromRow)]
pub struct EngagementModel {
    pub target_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}
