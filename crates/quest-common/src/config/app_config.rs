//! Configuration, resolved once at startup from the process environment
//! (with `.env` support for local runs).

use std::env;
use std::str::FromStr;

const DEFAULT_APP_NAME: &str = "openquest";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 900;
const DEFAULT_TOGGLE_ATTEMPTS: u32 = 3;
const DEFAULT_TOGGLE_BACKOFF_MS: u64 = 25;

/// Everything the binary needs, grouped by concern.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub engagement: EngagementConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

impl AppConfig {
    /// Resolve the full configuration from environment variables.
    ///
    /// # Errors
    /// Fails when a required variable (`API_PORT`, `DATABASE_URL`,
    /// `JWT_SECRET`) is missing, or a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings::from_env(),
            api: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            engagement: EngagementConfig::from_env(),
            cors: CorsConfig::from_env(),
            snowflake: SnowflakeConfig::from_env(),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.parse().ok())
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

impl AppSettings {
    fn from_env() -> Self {
        Self {
            name: env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            env: optional("APP_ENV").unwrap_or_default(),
        }
    }
}

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue("APP_ENV", s.to_string())),
        }
    }
}

/// Listen address for the HTTP API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = required("API_PORT")?;
        let port = raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?;

        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
        })
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: optional("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            min_connections: optional("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(DEFAULT_MIN_CONNECTIONS),
        })
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("JWT_SECRET")?,
            access_token_expiry: optional("JWT_ACCESS_TOKEN_EXPIRY")
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS),
        })
    }
}

/// Retry budget for the engagement toggle.
///
/// The toggle transaction reruns on retryable conflicts (unique violation,
/// serialization failure, deadlock) up to `max_attempts` times, sleeping an
/// exponentially growing backoff between attempts.
#[derive(Debug, Clone)]
pub struct EngagementConfig {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl EngagementConfig {
    fn from_env() -> Self {
        Self {
            // At least one attempt, or nothing would ever run.
            max_attempts: optional("ENGAGEMENT_MAX_ATTEMPTS")
                .filter(|n: &u32| *n >= 1)
                .unwrap_or(DEFAULT_TOGGLE_ATTEMPTS),
            backoff_ms: optional("ENGAGEMENT_BACKOFF_MS").unwrap_or(DEFAULT_TOGGLE_BACKOFF_MS),
        }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_TOGGLE_ATTEMPTS,
            backoff_ms: DEFAULT_TOGGLE_BACKOFF_MS,
        }
    }
}

/// Comma-separated origin allowlist from `CORS_ALLOWED_ORIGINS`.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self { allowed_origins }
    }
}

/// Worker id mixed into generated ids; distinct per instance.
#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

impl SnowflakeConfig {
    fn from_env() -> Self {
        Self {
            worker_id: optional("WORKER_ID").unwrap_or(0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
