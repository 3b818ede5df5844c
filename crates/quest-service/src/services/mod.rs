//! The application services: one per aggregate, plus the context they share.

pub mod comment;
pub mod context;
pub mod engagement;
pub mod error;
pub mod problem;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use engagement::EngagementService;
pub use error::{ServiceError, ServiceResult};
pub use problem::ProblemService;
