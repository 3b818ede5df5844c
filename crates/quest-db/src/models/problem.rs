//! Problem database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for problems table.
///
/// The four counter columns are caches over the engagements table and are
/// only ever written by the toggle transaction, which recomputes them with
/// `COUNT(*)` after changing the underlying rows.
#[derive(Debug, Clone, FromRow)]
pub struct ProblemModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub summary: String,
    pub upvotes: i64,
    pub investors: i64,
    pub builders: i64,
    pub followers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
