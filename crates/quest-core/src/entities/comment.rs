//! Comment entity - a reply attached to a problem

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
///
/// `upvotes` is a denormalized cache over the engagement ledger, recomputed
/// on every toggle and never written anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub problem_id: Snowflake,
    pub author_id: Snowflake,
    pub body: String,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment with a zero upvote counter
    pub fn new(id: Snowflake, problem_id: Snowflake, author_id: Snowflake, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            problem_id,
            author_id,
            body,
            upvotes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user authored this comment
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}
