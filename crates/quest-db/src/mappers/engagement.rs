//! Engagement entity <-> model mapper

use quest_core::entities::EngagementRecord;
use quest_core::value_objects::{EngagementKind, Snowflake};

use crate::models::EngagementModel;

/// Convert EngagementModel to EngagementRecord entity.
///
/// The kind column is CHECK-constrained to the four valid spellings, so an
/// unparseable value cannot come back from the table.
impl From<EngagementModel> for EngagementRecord {
    fn from(model: EngagementModel) -> Self {
        EngagementRecord {
            target_id: Snowflake::new(model.target_id),
            user_id: Snowflake::new(model.user_id),
            kind: model.kind.parse().unwrap_or(EngagementKind::Upvote),
            created_at: model.created_at,
        }
    }
}
