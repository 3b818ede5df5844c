//! `tracing` subscriber wiring.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! every target.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Output shape for the subscriber.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Fallback level filter when `RUST_LOG` is unset.
    pub level: Level,
    /// Emit one JSON object per line instead of human-readable text.
    pub json: bool,
    /// Log span open/close in addition to events.
    pub span_events: bool,
    /// Annotate events with source file and line.
    pub locations: bool,
    /// Annotate events with the emitting thread's name.
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            locations: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Chatty text output for local work.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// JSON lines at info level, without source locations.
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            locations: false,
            ..Self::default()
        }
    }
}

/// Install the global subscriber with defaults. Later calls report
/// [`TracingError::AlreadyInitialized`] instead of panicking.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Install the global subscriber with the given shape.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_file(config.locations)
        .with_line_number(config.locations)
        .with_thread_names(config.thread_names)
        .with_span_events(span_events);

    // `.json()` changes the layer's type, so box both shapes.
    let writer = if config.json {
        base.json().boxed()
    } else {
        base.boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(writer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
