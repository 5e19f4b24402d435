/**
 * Login Handler
 *
 * POST /api/users/login
 *
 * Looks the user up by email, checks the password with bcrypt and returns a
 * signed token. Unknown email and wrong password produce the same response.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::{Claim, TokenService};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::validation::{ValidJson, Validator};

const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Login handler
///
/// # Errors
///
/// * `400` - email or password missing
/// * `401` - no such user, or the password does not match
/// * `500` - database, hashing or signing failure
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<TokenService>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let mut v = Validator::default();
    let email = v.required("email", request.email, "Email is Required");
    let password = v.required("password", request.password, "Password is Required");
    v.finish()?;

    let user = get_user_by_email(&pool, &email).await?.ok_or_else(|| {
        tracing::warn!("Login for unknown email: {}", email);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !bcrypt::verify(&password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = tokens.mint(&Claim::for_user(user.id, user.name.clone()))?;

    tracing::info!("User logged in: {} ({})", user.name, user.id);

    Ok(Json(LoginResponse {
        msg: "Login is Success".to_string(),
        token,
    }))
}
