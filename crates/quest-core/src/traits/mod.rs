//! Repository traits - interfaces the infrastructure layer implements

mod repositories;

pub use repositories::{
    CommentRepository, EngagementRepository, PageQuery, ProblemRepository, RepoResult,
};
