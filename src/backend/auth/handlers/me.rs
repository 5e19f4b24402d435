/**
 * Current User Handler
 *
 * GET /api/users/me
 *
 * Returns the authenticated user's record without the password hash.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// # Errors
///
/// * `401` - missing or invalid token (rejected by the auth middleware)
/// * `404` - the token names a user that no longer exists
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserEnvelope>, BackendError> {
    let record = get_user_by_id(&pool, user.id).await?.ok_or_else(|| {
        tracing::warn!("Token for missing user: {}", user.id);
        BackendError::not_found("No User Found")
    })?;

    Ok(Json(UserEnvelope {
        user: record.into(),
    }))
}
