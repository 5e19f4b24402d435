/**
 * Session Tokens
 *
 * This module mints and verifies the signed bearer tokens that identify a
 * user between requests.
 *
 * A token carries the user's id and display name under a `user` claim, the
 * issue time, and an expiry only when a token lifetime is configured:
 *
 * ```json
 * { "user": { "id": "6f1c...", "name": "Ann" }, "iat": 1735689600 }
 * ```
 *
 * Tokens are HS256 signed with the configured secret. The service is cheap to
 * clone and lives in the application state.
 */

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::server::config::Config;

/// Identity carried inside a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub user: ClaimUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimUser {
    pub id: Uuid,
    pub name: String,
}

impl Claim {
    pub fn for_user(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            user: ClaimUser {
                id,
                name: name.into(),
            },
        }
    }
}

/// Token failures
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed, or expired
    #[error("invalid token")]
    InvalidToken,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Issue time plus lifetime does not fit a timestamp
    #[error("token lifetime out of range")]
    Lifetime,
}

/// Wire form of a token payload
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    user: ClaimUser,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Mints and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self::from_secret(config.jwt_secret.as_bytes(), config.token_ttl)
    }

    pub fn from_secret(secret: &[u8], ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is only present when a lifetime is configured
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for the given identity
    pub fn mint(&self, claim: &Claim) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let exp = match self.ttl {
            Some(ttl) => Some(
                i64::try_from(ttl.as_secs())
                    .ok()
                    .and_then(|secs| now.checked_add(secs))
                    .ok_or(TokenError::Lifetime)?,
            ),
            None => None,
        };
        let payload = TokenPayload {
            user: claim.user.clone(),
            iat: now,
            exp,
        };

        encode(&Header::default(), &payload, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Check the signature (and expiry, when present) and return the identity
    pub fn verify(&self, token: &str) -> Result<Claim, TokenError> {
        let data = decode::<TokenPayload>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            TokenError::InvalidToken
        })?;

        Ok(Claim {
            user: data.claims.user,
        })
    }
}
