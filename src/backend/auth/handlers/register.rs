/**
 * Register Handler
 *
 * POST /api/users/register
 *
 * Validates name, email and password, hashes the password with bcrypt and
 * stores the user with a gravatar avatar. No token is issued; clients log in
 * afterwards.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::server::config::Config;
use crate::backend::validation::{ValidJson, Validator};

/// Register handler
///
/// # Errors
///
/// * `400` - a required field is missing or empty
/// * `401` - the email is already registered
/// * `500` - hashing or database failure
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let mut v = Validator::default();
    let name = v.required("name", request.name, "Name is Required");
    let email = v.required("email", request.email, "Email is Required");
    let password = v.required("password", request.password, "Password is Required");
    v.finish()?;

    tracing::info!("Registration request for: {}", email);

    if get_user_by_email(&pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::already_exists("User is Already Exists"));
    }

    let password_hash = bcrypt::hash(&password, config.bcrypt_cost)?;

    // A concurrent registration can still win the race; the UNIQUE index decides.
    let user = create_user(&pool, &name, &email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::already_exists("User is Already Exists")
            } else {
                e.into()
            }
        })?;

    tracing::info!("User registered: {} ({})", user.name, user.id);

    Ok(Json(MessageResponse::new("Registration is Success")))
}
