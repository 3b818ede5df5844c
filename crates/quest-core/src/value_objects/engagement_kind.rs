//! Engagement kind and target kind discriminators
//!
//! An engagement kind names one toggleable relation between a user and a
//! target. Each kind backs exactly one denormalized counter column, so the
//! kind enum is also the single source of truth for which column the
//! reconciliation step writes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Engagement type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    /// "This problem matters" vote
    Upvote,
    /// Investment interest
    Invest,
    /// Build interest ("I want to work on this")
    Build,
    /// Follow for updates
    Follow,
}

impl EngagementKind {
    /// All kinds, in display order
    pub const ALL: [Self; 4] = [Self::Upvote, Self::Invest, Self::Build, Self::Follow];

    /// Stable string form used in URL segments and the ledger table
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Invest => "invest",
            Self::Build => "build",
            Self::Follow => "follow",
        }
    }

    /// Name of the counter column this kind reconciles on the target row
    #[inline]
    #[must_use]
    pub fn counter_column(self) -> &'static str {
        match self {
            Self::Upvote => "upvotes",
            Self::Invest => "investors",
            Self::Build => "builders",
            Self::Follow => "followers",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EngagementKind {
    type Err = EngagementKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "invest" => Ok(Self::Invest),
            "build" => Ok(Self::Build),
            "follow" => Ok(Self::Follow),
            _ => Err(EngagementKindParseError::Unknown),
        }
    }
}

/// Error when parsing an EngagementKind from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngagementKindParseError {
    #[error("unknown engagement kind")]
    Unknown,
}

/// The table family a target id resolves to
///
/// Snowflake ids are globally unique across entity types, so a bare target
/// id is enough to identify the row; this enum records which table it was
/// found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Problem,
    Comment,
}

impl TargetKind {
    /// Table owning the target row and its counter columns
    #[inline]
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Self::Problem => "problems",
            Self::Comment => "comments",
        }
    }

    /// Check whether this target type accepts an engagement kind
    ///
    /// Problems take all four kinds; comments only take upvotes.
    #[inline]
    #[must_use]
    pub fn supports(self, kind: EngagementKind) -> bool {
        match self {
            Self::Problem => true,
            Self::Comment => kind == EngagementKind::Upvote,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Problem => f.write_str("problem"),
            Self::Comment => f.write_str("comment"),
        }
    }
}
