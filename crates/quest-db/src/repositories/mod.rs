//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in quest-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod engagement;
mod error;
mod problem;

pub use comment::PgCommentRepository;
pub use engagement::PgEngagementRepository;
pub use problem::PgProblemRepository;
