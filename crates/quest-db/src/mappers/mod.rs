//! Entity to model mappers
//!
//! This module provides conversions between domain entities (quest-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod comment;
mod engagement;
mod problem;

pub use comment::CommentInsert;
pub use problem::{ProblemInsert, ProblemUpdate};
