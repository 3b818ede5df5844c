//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod comments;
pub mod engagements;
pub mod health;
pub mod problems;
