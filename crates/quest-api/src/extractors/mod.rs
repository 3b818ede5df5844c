//! Request extractors: bearer auth, validated JSON bodies, cursor pagination.

mod auth;
mod pagination;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::Pagination;
pub use validated::ValidatedJson;
