//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod engagement;
mod problem;

pub use comment::CommentModel;
pub use engagement::EngagementModel;
pub use problem::ProblemModel;
