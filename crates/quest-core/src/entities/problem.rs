//! Problem entity - a community-submitted problem worth solving

use chrono::{DateTime, Utc};

use crate::value_objects::{EngagementKind, Snowflake};

/// Problem entity
///
/// The four counter fields are denormalized caches over the engagement
/// ledger. They are recomputed from the live record set on every toggle and
/// must never be adjusted by any other write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub summary: String,
    pub upvotes: i64,
    pub investors: i64,
    pub builders: i64,
    pub followers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Create a new Problem with all counters at zero
    pub fn new(id: Snowflake, author_id: Snowflake, title: String, summary: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            title,
            summary,
            upvotes: 0,
            investors: 0,
            builders: 0,
            followers: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user authored this problem
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Read the stored counter for an engagement kind
    #[inline]
    pub fn engagement_count(&self, kind: EngagementKind) -> i64 {
        match kind {
            EngagementKind::Upvote => self.upvotes,
            EngagementKind::Invest => self.investors,
            EngagementKind::Build => self.builders,
            EngagementKind::Follow => self.followers,
        }
    }

    /// Update the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Update the summary
    pub fn set_summary(&mut self, summary: String) {
        self.summary = summary;
        self.updated_at = Utc::now();
    }
}
