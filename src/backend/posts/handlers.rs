//! HTTP handlers for posts
//!
//! Every route here sits behind the auth middleware. Path ids that are not
//! UUIDs are treated as missing documents.

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::{is_foreign_key_violation, is_unique_violation, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::posts::db;
use crate::backend::posts::types::{
    CommentRequest, CreatePostRequest, DeletedPostResponse, Post, PostEnvelope, PostsEnvelope,
};
use crate::backend::validation::{parse_id, ValidJson, Validator};

const NO_POST: &str = "No Post Found";
const NOT_AUTHORIZED: &str = "User is not authorized";

async fn load_author(pool: &SqlitePool, id: Uuid) -> Result<User, BackendError> {
    get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("No User Found"))
}

async fn load_post(pool: &SqlitePool, post_id: Uuid) -> Result<Post, BackendError> {
    db::get_post(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_POST))
}

/// POST /api/posts
pub async fn create_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<CreatePostRequest>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let mut v = Validator::default();
    let text = v.required("text", request.text, "Text is Required");
    let image = v.required("image", request.image, "Image is Required");
    v.finish()?;

    let author = load_author(&pool, user.id).await?;
    let post = db::create_post(&pool, &author, &text, &image).await?;

    tracing::info!("Post {} created by {}", post.id, author.id);

    Ok(Json(PostEnvelope { post }))
}

/// GET /api/posts
pub async fn list_posts(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
) -> Result<Json<PostsEnvelope>, BackendError> {
    let posts = db::list_posts(&pool).await?;
    Ok(Json(PostsEnvelope { posts }))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let post_id = parse_id(&post_id, NO_POST)?;
    let post = load_post(&pool, post_id).await?;
    Ok(Json(PostEnvelope { post }))
}

/// DELETE /api/posts/{post_id}
///
/// Only the author may delete a post. The deleted document is returned.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<DeletedPostResponse>, BackendError> {
    let post_id = parse_id(&post_id, NO_POST)?;
    let post = load_post(&pool, post_id).await?;

    if post.user != user.id {
        tracing::warn!("User {} tried to delete post {} of {}", user.id, post.id, post.user);
        return Err(BackendError::unauthorized(NOT_AUTHORIZED));
    }

    if !db::delete_post(&pool, post_id).await? {
        return Err(BackendError::not_found(NO_POST));
    }

    tracing::info!("Post {} deleted", post_id);

    Ok(Json(DeletedPostResponse {
        msg: "Post is Deleted".to_string(),
        post,
    }))
}

/// PUT /api/posts/like/{post_id}
pub async fn like_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let post_id = parse_id(&post_id, NO_POST)?;
    load_post(&pool, post_id).await?;

    db::add_like(&pool, post_id, user.id).await.map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::conflict("Post has already been liked")
        } else if is_foreign_key_violation(&e) {
            BackendError::not_found(NO_POST)
        } else {
            e.into()
        }
    })?;

    let post = load_post(&pool, post_id).await?;
    Ok(Json(PostEnvelope { post }))
}

/// PUT /api/posts/unlike/{post_id}
pub async fn unlike_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let post_id = parse_id(&post_id, NO_POST)?;
    load_post(&pool, post_id).await?;

    if !db::remove_like(&pool, post_id, user.id).await? {
        return Err(BackendError::conflict("Post has not been liked"));
    }

    let post = load_post(&pool, post_id).await?;
    Ok(Json(PostEnvelope { post }))
}

/// POST /api/posts/comment/{post_id}
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<String>,
    ValidJson(request): ValidJson<CommentRequest>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let mut v = Validator::default();
    let text = v.required("text", request.text, "Text is Required");
    v.finish()?;

    let post_id = parse_id(&post_id, NO_POST)?;
    load_post(&pool, post_id).await?;
    let author = load_author(&pool, user.id).await?;

    let comment_id = db::add_comment(&pool, post_id, &author, &text)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                BackendError::not_found(NO_POST)
            } else {
                e.into()
            }
        })?;
    tracing::debug!("Comment {} added to post {}", comment_id, post_id);

    let post = load_post(&pool, post_id).await?;
    Ok(Json(PostEnvelope { post }))
}

/// DELETE /api/posts/comment/{post_id}/{comment_id}
///
/// Only the comment's author may delete it.
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<PostEnvelope>, BackendError> {
    let post_id = parse_id(&post_id, NO_POST)?;
    load_post(&pool, post_id).await?;

    let comment_id = parse_id(&comment_id, "Comment not exists")?;
    let comment = db::get_comment(&pool, post_id, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not exists"))?;

    if comment.user_id != user.id {
        tracing::warn!("User {} tried to delete comment {} of {}", user.id, comment.id, comment.user_id);
        return Err(BackendError::unauthorized(NOT_AUTHORIZED));
    }

    if !db::delete_comment(&pool, post_id, comment_id).await? {
        return Err(BackendError::not_found("Comment not exists"));
    }

    let post = load_post(&pool, post_id).await?;
    Ok(Json(PostEnvelope { post }))
}
