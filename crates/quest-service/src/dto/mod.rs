//! Request and response shapes crossing the API boundary, plus the mappers
//! that build them from domain entities.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateCommentRequest, CreateProblemRequest, UpdateProblemRequest};

pub use responses::{
    CommentResponse, EngagementResponse, HealthChecks, HealthResponse, PaginatedResponse,
    PaginationMeta, ProblemResponse, ReadinessResponse,
};
