//! Cursor pagination parsed from the query string.
//!
//! Listings accept `?before=<id>`, `?after=<id>`, and `?limit=<n>`. Cursors
//! are engagement-target ids in decimal string form; the limit is clamped
//! rather than rejected.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use quest_core::{PageQuery, Snowflake};
use serde::Deserialize;

use crate::response::ApiError;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
struct RawPage {
    before: Option<String>,
    after: Option<String>,
    limit: Option<i64>,
}

/// Parsed pagination window, ready to hand to the service layer.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<Pagination> for PageQuery {
    fn from(p: Pagination) -> Self {
        PageQuery {
            before: p.before,
            after: p.after,
            limit: p.limit,
        }
    }
}

fn parse_cursor(name: &str, raw: &str) -> Result<Snowflake, ApiError> {
    raw.parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_query(format!("'{name}' is not a valid cursor")))
}

impl TryFrom<RawPage> for Pagination {
    type Error = ApiError;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        let before = match raw.before.as_deref() {
            Some(s) => Some(parse_cursor("before", s)?),
            None => None,
        };
        let after = match raw.after.as_deref() {
            Some(s) => Some(parse_cursor("after", s)?),
            None => None,
        };

        Ok(Self {
            before,
            after,
            limit: raw.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPage>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Self::try_from(raw)
    }
}
