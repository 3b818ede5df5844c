//! Shared plumbing for the HTTP integration tests: spawning a server on an
//! ephemeral port, minting access tokens, and asserting on responses.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use quest_api::{create_app, create_app_state};
use quest_common::config::{
    AppSettings, CorsConfig, DatabaseConfig, EngagementConfig, Environment, JwtConfig,
    ServerConfig, SnowflakeConfig,
};
use quest_common::{AppConfig, JwtService};
use quest_core::Snowflake;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// JWT secret used when the environment does not provide one
const TEST_JWT_SECRET: &str = "integration-test-secret";

/// A running API server plus a client wired to its address.
pub struct TestServer {
    pub client: Client,
    addr: SocketAddr,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with the stock test configuration.
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Spawn a server on an ephemeral port and wait until it answers.
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Token minting must share the server's signing secret
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        wait_until_healthy(&client, addr).await?;

        Ok(Self {
            client,
            addr,
            jwt,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Mint an access token for a synthetic user.
    pub fn token_for(&self, user_id: Snowflake) -> Result<String> {
        Ok(self.jwt.issue_token(user_id)?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.get(self.url(path)), token).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(bearer(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.delete(self.url(path)), token)
            .send()
            .await?)
    }
}

fn bearer(req: RequestBuilder, token: &str) -> RequestBuilder {
    req.header("Authorization", format!("Bearer {token}"))
}

/// Poll the liveness route until the spawned server answers.
///
/// The listener is bound before the serve task starts, so the first probe
/// usually succeeds; the loop covers slow CI machines.
async fn wait_until_healthy(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{addr}/health");
    for _ in 0..50 {
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    bail!("server at {addr} never became healthy")
}

/// Build a configuration for tests.
///
/// `DATABASE_URL` must point at a reachable PostgreSQL instance; everything
/// else falls back to test defaults. Set `JWT_SECRET` to match an externally
/// running server.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        bail!("DATABASE_URL is required for integration tests");
    };
    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| TEST_JWT_SECRET.to_string());

    Ok(AppConfig {
        app: AppSettings {
            name: "openquest-tests".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            // The test server binds its own ephemeral port; this value is unused
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: jwt_secret,
            access_token_expiry: 900,
        },
        engagement: EngagementConfig::default(),
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 0 },
    })
}

/// True when the integration environment is usable; prints why when not.
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

async fn require_status(response: Response, expected: StatusCode) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("expected status {expected}, got {status}. Body: {body}")
}

/// Assert the status code and deserialize the JSON body.
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    Ok(require_status(response, expected_status)
        .await?
        .json()
        .await?)
}

/// Assert the status code, discarding the body.
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    require_status(response, expected_status).await.map(drop)
}
