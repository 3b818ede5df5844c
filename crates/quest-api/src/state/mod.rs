//! Shared handler state.

use std::fmt;
use std::sync::Arc;

use quest_common::{AppConfig, JwtService};
use quest_service::ServiceContext;

/// State cloned into every handler. One `Arc` over the service context and
/// the resolved configuration, so cloning is a pointer bump.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    ctx: ServiceContext,
    config: AppConfig,
}

impl AppState {
    pub fn new(ctx: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(StateInner { ctx, config }),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.inner.ctx.jwt_service()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.inner.config.app.name)
            .finish_non_exhaustive()
    }
}
