//! Environment-driven configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, EngagementConfig,
    Environment, JwtConfig, ServerConfig, SnowflakeConfig,
};
