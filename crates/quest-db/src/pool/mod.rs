//! Pool construction and migration runner.

mod postgres;

pub use postgres::{create_pool, run_migrations, PoolSettings};
pub use sqlx::postgres::PgPool;
