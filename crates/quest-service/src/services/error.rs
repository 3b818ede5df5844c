//! Error type shared by every application service.

use quest_core::DomainError;

/// What a service call can fail with.
///
/// Domain rule violations pass through unchanged; the remaining variants
/// cover failures the services detect themselves. [`status_code`] and
/// [`error_code`] give the API layer everything it needs to build a
/// response without matching on variants.
///
/// [`status_code`]: ServiceError::status_code
/// [`error_code`]: ServiceError::error_code
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// HTTP status the API layer should answer with.
    pub fn status_code(&self) -> u16 {
        self.class().0
    }

    /// Stable machine-readable code for response bodies.
    pub fn error_code(&self) -> &str {
        self.class().1
    }

    fn class(&self) -> (u16, &str) {
        match self {
            Self::Domain(e) => (domain_status(e), e.code()),
            Self::NotFound { .. } => (404, "NOT_FOUND"),
            Self::Validation(_) => (400, "VALIDATION_ERROR"),
            Self::Conflict(_) => (409, "CONFLICT"),
        }
    }
}

fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() {
        400
    } else if e.is_retryable() {
        409
    } else {
        500
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
