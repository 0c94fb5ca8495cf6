/// Token issuing and verification using HS256 with a shared secret
///
/// Tokens are self-describing: verification reconstructs the caller identity
/// from the claims alone, with no repository lookup.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Identity, User};

/// JWT claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Generate an access token for a user
pub fn issue_token(user: &User, secret: &str, expiry_hours: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Storage(format!("failed to sign token: {}", e)))
}

/// Verify a bearer token and derive the caller identity
///
/// Signature and expiry failures both surface as `Unauthenticated`.
pub fn verify_token(token: &str, secret: &str) -> Result<Identity> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        AppError::Unauthenticated("invalid or expired token".to_string())
    })?;

    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthenticated("invalid user id in token".to_string()))?;

    Ok(Identity {
        user_id,
        email: data.claims.email,
        name: data.claims.name,
    })
}
