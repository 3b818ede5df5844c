//! Comment entity <-> model mapper

use quest_core::entities::Comment;
use quest_core::value_objects::Snowflake;

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            problem_id: Snowflake::new(model.problem_id),
            author_id: Snowflake::new(model.author_id),
            body: model.body,
            upvotes: model.upvotes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert Comment entity reference to values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub problem_id: i64,
    pub author_id: i64,
    pub body: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            problem_id: comment.problem_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            body: &comment.body,
        }
    }
}
