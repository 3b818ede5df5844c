//! # quest-common
//!
//! Cross-cutting pieces shared by the service and API layers:
//! environment-driven configuration, the application error type, JWT
//! issue/verify, and tracing setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, EngagementConfig,
    Environment, JwtConfig, ServerConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
