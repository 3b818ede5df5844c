//! Composition root. Builds the pool, repositories, and service context
//! from configuration, then serves the router.

use std::sync::Arc;

use axum::Router;
use quest_common::{AppConfig, AppError, JwtService};
use quest_core::SnowflakeGenerator;
use quest_db::{
    create_pool, run_migrations, PgCommentRepository, PgEngagementRepository, PgProblemRepository,
    PoolSettings,
};
use quest_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Assemble the router: the versioned API behind the middleware stack,
/// merged with bare health probes that skip it.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = middleware::apply(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    api.merge(health_routes()).with_state(state)
}

/// Connect, migrate, and wire every dependency into an [`AppState`].
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let settings = PoolSettings {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..PoolSettings::default()
    };

    let pool = create_pool(&settings)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!(
        max_connections = settings.max_connections,
        "connected to PostgreSQL"
    );

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("migrations up to date");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let id_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let ctx = ServiceContextBuilder::new()
        .pool(pool.clone())
        .problem_repo(Arc::new(PgProblemRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .engagement_repo(Arc::new(PgEngagementRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(id_generator)
        .engagement_config(config.engagement.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(ctx, config))
}

/// Bind and serve until the process is stopped.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}
