//! OpenQuest API server binary.
//!
//! Configuration comes from environment variables, with `.env` support
//! for local runs. See `quest_common::AppConfig` for the variable list.

use anyhow::Context;
use quest_common::{try_init_tracing, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A second init attempt (e.g. under a test harness) is harmless.
    let _ = try_init_tracing();

    let config = AppConfig::from_env().context("configuration is incomplete")?;
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        addr = %config.api.address(),
        "starting OpenQuest API"
    );

    quest_api::run(config)
        .await
        .context("server exited with an error")
}
