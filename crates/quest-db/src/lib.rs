//! # quest-db
//!
//! PostgreSQL persistence for the engagement ledger. Implements the
//! repository traits from `quest-core` with SQLx, owns the schema
//! migrations, and keeps the stored counters in step with the
//! `engagements` table.
//!
//! Counter columns on `problems` and `comments` are only ever written by
//! the toggle path in [`repositories::PgEngagementRepository`], which
//! recounts the ledger inside the same transaction. Nothing else in this
//! crate touches them.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool, PoolSettings};
pub use repositories::{PgCommentRepository, PgEngagementRepository, PgProblemRepository};
