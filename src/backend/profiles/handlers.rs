//! HTTP handlers for profiles
//!
//! Reads by user id, profile id and the full listing are public; everything
//! that changes a profile works on the caller's own profile.

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::users::{self, get_user_by_id};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::profiles::db;
use crate::backend::profiles::types::{
    EducationRequest, ExperienceRequest, Profile, ProfileEnvelope, ProfileMessageResponse,
    ProfileRequest, ProfilesEnvelope,
};
use crate::backend::validation::{parse_id, ValidJson};

const NO_PROFILE: &str = "No Profile Found";
const NO_PROFILE_FOR_USER: &str = "No Profile Found for this user";

async fn own_profile(pool: &SqlitePool, user_id: Uuid) -> Result<Profile, BackendError> {
    db::get_profile_by_user(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE))
}

/// GET /api/profiles/me
pub async fn get_my_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileEnvelope>, BackendError> {
    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileEnvelope { profile }))
}

/// POST /api/profiles
pub async fn create_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<ProfileRequest>,
) -> Result<Json<ProfileMessageResponse>, BackendError> {
    let fields = request.validate()?;

    if get_user_by_id(&pool, user.id).await?.is_none() {
        return Err(BackendError::not_found("No User Found"));
    }

    db::create_profile(&pool, user.id, &fields).await.map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::conflict("Profile already exists")
        } else {
            e.into()
        }
    })?;

    tracing::info!("Profile created for user {}", user.id);

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileMessageResponse {
        msg: "Profile is Created Successfully".to_string(),
        profile,
    }))
}

/// PUT /api/profiles
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<ProfileRequest>,
) -> Result<Json<ProfileMessageResponse>, BackendError> {
    let fields = request.validate()?;

    if !db::update_profile(&pool, user.id, &fields).await? {
        return Err(BackendError::not_found(NO_PROFILE));
    }

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileMessageResponse {
        msg: "Profile is Updated Successfully".to_string(),
        profile,
    }))
}

/// GET /api/profiles/users/{user_id}
pub async fn get_profile_by_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileEnvelope>, BackendError> {
    let user_id = parse_id(&user_id, NO_PROFILE_FOR_USER)?;
    let profile = db::get_profile_by_user(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE_FOR_USER))?;
    Ok(Json(ProfileEnvelope { profile }))
}

/// DELETE /api/profiles/users/{user_id}
///
/// Removes the user with their profile, posts, comments and likes. The
/// caller must be that user or an admin.
pub async fn delete_account(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let target = parse_id(&user_id, "No User Found")?;

    if target != user.id {
        let is_admin = get_user_by_id(&pool, user.id)
            .await?
            .is_some_and(|requester| requester.is_admin);
        if !is_admin {
            tracing::warn!("User {} tried to delete account {}", user.id, target);
            return Err(BackendError::unauthorized("User is not authorized"));
        }
    }

    if !users::delete_account(&pool, target).await? {
        return Err(BackendError::not_found("No User Found"));
    }

    tracing::info!("Account {} deleted by {}", target, user.id);

    Ok(Json(MessageResponse::new("Account is Deleted")))
}

/// PUT /api/profiles/experience
pub async fn add_experience(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<ExperienceRequest>,
) -> Result<Json<ProfileEnvelope>, BackendError> {
    let fields = request.validate()?;
    let profile = own_profile(&pool, user.id).await?;

    db::add_experience(&pool, profile.id, &fields).await?;

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileEnvelope { profile }))
}

/// DELETE /api/profiles/experience/{exp_id}
pub async fn delete_experience(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileMessageResponse>, BackendError> {
    let profile = own_profile(&pool, user.id).await?;
    let exp_id = parse_id(&exp_id, "No Experience Found")?;

    if !db::delete_experience(&pool, profile.id, exp_id).await? {
        return Err(BackendError::not_found("No Experience Found"));
    }

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileMessageResponse {
        msg: "Experience is Deleted".to_string(),
        profile,
    }))
}

/// PUT /api/profiles/education
pub async fn add_education(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<EducationRequest>,
) -> Result<Json<ProfileEnvelope>, BackendError> {
    let fields = request.validate()?;
    let profile = own_profile(&pool, user.id).await?;

    db::add_education(&pool, profile.id, &fields).await?;

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileEnvelope { profile }))
}

/// DELETE /api/profiles/education/{edu_id}
pub async fn delete_education(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileMessageResponse>, BackendError> {
    let profile = own_profile(&pool, user.id).await?;
    let edu_id = parse_id(&edu_id, "No Education Found")?;

    if !db::delete_education(&pool, profile.id, edu_id).await? {
        return Err(BackendError::not_found("No Education Found"));
    }

    let profile = own_profile(&pool, user.id).await?;
    Ok(Json(ProfileMessageResponse {
        msg: "Education is Deleted".to_string(),
        profile,
    }))
}

/// GET /api/profiles/all
pub async fn list_profiles(State(pool): State<SqlitePool>) -> Result<Json<ProfilesEnvelope>, BackendError> {
    let profiles = db::list_profiles(&pool).await?;
    Ok(Json(ProfilesEnvelope { profiles }))
}

/// GET /api/profiles/{profile_id}
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    Path(profile_id): Path<String>,
) -> Result<Json<ProfileEnvelope>, BackendError> {
    let profile_id = parse_id(&profile_id, NO_PROFILE_FOR_USER)?;
    let profile = db::get_profile_by_id(&pool, profile_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE_FOR_USER))?;
    Ok(Json(ProfileEnvelope { profile }))
}
