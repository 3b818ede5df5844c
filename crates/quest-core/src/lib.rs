//! # quest-core
//!
//! Domain layer: entities, value objects, repository traits, and the domain
//! error type. Nothing in here knows about HTTP or PostgreSQL; the outer
//! crates depend on this one, never the reverse.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

pub use entities::{Comment, EngagementRecord, Problem, ToggleOutcome};
pub use error::DomainError;
pub use traits::{
    CommentRepository, EngagementRepository, PageQuery, ProblemRepository, RepoResult,
};
pub use value_objects::{
    EngagementKind, EngagementKindParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError,
    TargetKind,
};
