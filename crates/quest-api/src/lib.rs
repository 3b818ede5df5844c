//! # quest-api
//!
//! Axum HTTP surface for the engagement ledger. Routes live under
//! `/api/v1`; engagement state is per-caller, so reads take an optional
//! bearer token and writes require one.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
