//! Login token issuing.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::JwtConfig;
use domain::User;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a token could not be produced.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT expiration is not configured")]
    MissingExpiry,

    #[error("JWT encoding failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs HS256 tokens for authenticated users.
///
/// Missing configuration is only reported when a token is requested.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    issuer: String,
    secret: Option<String>,
    expiration_hours: Option<i64>,
}

impl TokenIssuer {
    pub fn new(issuer: impl Into<String>, config: &JwtConfig) -> Self {
        Self {
            issuer: issuer.into(),
            secret: config.secret.clone().filter(|s| !s.is_empty()),
            expiration_hours: config.expiration_hours,
        }
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let secret = self.secret.as_deref().ok_or(TokenError::MissingSecret)?;
        let hours = self.expiration_hours.ok_or(TokenError::MissingExpiry)?;

        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(hours)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}
