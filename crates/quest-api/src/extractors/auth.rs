//! Bearer-token authentication extractors.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use quest_core::Snowflake;
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// Identity taken from a verified JWT. Rejects the request when the
/// header is absent or the token does not check out.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

/// Identity when the caller may be anonymous.
///
/// Absent header means `None`; a header that is present but invalid is
/// still a hard 401, so a bad token never silently downgrades to
/// anonymous access.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|auth| auth.user_id)
    }
}

fn verify_bearer(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = state.jwt_service().validate_token(token).map_err(|e| {
        warn!(error = %e, "rejected bearer token");
        ApiError::InvalidAuthFormat
    })?;

    let user_id = claims.user_id().map_err(|e| {
        warn!(error = %e, "token subject is not a valid id");
        ApiError::InvalidAuthFormat
    })?;

    Ok(AuthUser { user_id })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        verify_bearer(&AppState::from_ref(state), bearer.token())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let user = verify_bearer(&AppState::from_ref(state), bearer.token())?;
                Ok(Self(Some(user)))
            }
            Err(_) => Ok(Self(None)),
        }
    }
}
