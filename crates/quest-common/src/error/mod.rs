//! Application-level error type and its wire shape

mod app_error;

pub use app_error::{AppError, AppResult, ErrorResponse};
