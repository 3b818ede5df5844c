//! Problem entity <-> model mapper

use quest_core::entities::Problem;
use quest_core::value_objects::Snowflake;

use crate::models::ProblemModel;

/// Convert ProblemModel to Problem entity
impl From<ProblemModel> for Problem {
    fn from(model: ProblemModel) -> Self {
        Problem {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            summary: model.summary,
            upvotes: model.upvotes,
            investors: model.investors,
            builders: model.builders,
            followers: model.followers,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert Problem entity reference to values for database insertion.
///
/// Counters are not included; the insert statement leaves them at their
/// column default of zero.
pub struct ProblemInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub title: &'a str,
    pub summary: &'a str,
}

impl<'a> ProblemInsert<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            id: problem.id.into_inner(),
            author_id: problem.author_id.into_inner(),
            title: &problem.title,
            summary: &problem.summary,
        }
    }
}

/// Convert Problem entity reference to values for database update.
///
/// The writable set is title and summary only. Counter columns belong to
/// the engagement toggle transaction and must never appear here.
pub struct ProblemUpdate<'a> {
    pub id: i64,
    pub title: &'a str,
    pub summary: &'a str,
}

impl<'a> ProblemUpdate<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            id: problem.id.into_inner(),
            title: &problem.title,
            summary: &problem.summary,
        }
    }
}
