//! Domain entities - core business objects

mod comment;
mod engagement;
mod problem;

pub use comment::Comment;
pub use engagement::{EngagementRecord, ToggleOutcome};
pub use problem::Problem;
