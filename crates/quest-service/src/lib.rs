//! # quest-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CommentResponse, CreateCommentRequest, CreateProblemRequest, EngagementResponse,
    HealthResponse, PaginatedResponse, ProblemResponse, ReadinessResponse, UpdateProblemRequest,
};
pub use services::{
    CommentService, EngagementService, ProblemService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
