//! Engagement record - one user's toggleable engagement with a target
//!
//! Presence of a record means "engaged", absence means "not engaged". The
//! `(target_id, user_id, kind)` tuple is unique: this is a toggle set, not a
//! counter. Target counters are derived from this set, never the reverse.

use chrono::{DateTime, Utc};

use crate::value_objects::{EngagementKind, Snowflake};

/// A single engagement ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementRecord {
    pub target_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: EngagementKind,
    pub created_at: DateTime<Utc>,
}

impl EngagementRecord {
    /// Create a new EngagementRecord
    pub fn new(target_id: Snowflake, user_id: Snowflake, kind: EngagementKind) -> Self {
        Self {
            target_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Check if this record is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: EngagementKind) -> bool {
        self.kind == kind
    }
}

/// Result of one toggle: the caller's new engagement state and the freshly
/// recomputed counter value for the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub engaged: bool,
    pub count: i64,
}

impl ToggleOutcome {
    /// Create a new ToggleOutcome
    pub fn new(engaged: bool, count: i64) -> Self {
        Self { engaged, count }
    }
}
