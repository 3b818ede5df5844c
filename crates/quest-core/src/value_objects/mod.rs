//! Value objects - immutable types that represent domain concepts

mod engagement_kind;
mod snowflake;

pub use engagement_kind::{EngagementKind, EngagementKindParseError, TargetKind};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
