//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use quest_core::entities::{Comment, Problem, ToggleOutcome};

use super::responses::{CommentResponse, EngagementResponse, ProblemResponse};

// ============================================================================
// Problem Mappers
// ============================================================================

impl From<&Problem> for ProblemResponse {
    fn from(problem: &Problem) -> Self {
        Self {
            id: problem.id.to_string(),
            author_id: problem.author_id.to_string(),
            title: problem.title.clone(),
            summary: problem.summary.clone(),
            upvotes: problem.upvotes,
            investors: problem.investors,
            builders: problem.builders,
            followers: problem.followers,
            created_at: problem.created_at,
            updated_at: problem.updated_at,
        }
    }
}

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self::from(&problem)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            problem_id: comment.problem_id.to_string(),
            author_id: comment.author_id.to_string(),
            body: comment.body.clone(),
            upvotes: comment.upvotes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

// ============================================================================
// Engagement Mappers
// ============================================================================

impl From<ToggleOutcome> for EngagementResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            engaged: outcome.engaged,
            count: outcome.count,
        }
    }
}
