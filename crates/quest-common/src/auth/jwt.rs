//! Bearer-token verification.
//!
//! OpenQuest does not own sign-in; an upstream identity service issues
//! tokens and this crate only checks them and pulls out the caller id.
//! `issue_token` exists so local runs and the test harness can mint
//! their own.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quest_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Caller id as a decimal string.
    pub sub: String,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an id.
    ///
    /// # Errors
    /// Fails when the subject is not a decimal id.
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        match self.sub.parse::<i64>() {
            Ok(raw) => Ok(Snowflake::new(raw)),
            Err(_) => Err(AppError::InvalidToken),
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }
}

/// Verifies bearer tokens signed with the shared HS256 secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    /// Build from the shared secret and a token lifetime in seconds.
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Mint a token for `user_id` expiring after the configured lifetime.
    ///
    /// # Errors
    /// Fails when encoding fails.
    pub fn issue_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(self.token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.into()))
    }

    /// Check signature and expiry, returning the claims on success.
    ///
    /// # Errors
    /// Expired tokens report [`AppError::TokenExpired`]; everything else
    /// (bad signature, malformed input, wrong algorithm) reports
    /// [`AppError::InvalidToken`].
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| classify(&e))
    }
}

fn classify(e: &jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &Algorithm::HS256)
            .field("token_expiry_secs", &self.token_expiry)
            .finish_non_exhaustive()
    }
}
