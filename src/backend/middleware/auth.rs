/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. The middleware
 * reads the token from the `x-auth-token` header, verifies it and attaches
 * the identity to the request extensions, where handlers pick it up through
 * the `AuthUser` extractor.
 *
 * Ownership rules (only the author may delete a post, and so on) are left to
 * the handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Header carrying the session token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Identity of the caller, taken from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
}

/// Authentication middleware
///
/// Returns 401 without running the handler when the header is missing or
/// empty, or when the token does not verify.
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Missing {} header on {}", AUTH_HEADER, request.uri().path());
            BackendError::unauthorized("No Token Provided, Authentication Denied")
        })?;

    let claim = tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected token on {}: {}", request.uri().path(), e);
        BackendError::from(e)
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: claim.user.id,
        name: claim.user.name,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`]; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("No Token Provided, Authentication Denied")
            })
    }
}
