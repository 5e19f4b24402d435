//! Post request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post with its likes and comments, newest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    /// Author id
    pub user: Uuid,
    pub text: String,
    pub image: String,
    /// Author name at the time of posting
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    pub user: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreatePostRequest {
    pub text: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// `{ "post": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: Post,
}

/// `{ "posts": [...] }`
#[derive(Debug, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<Post>,
}

/// `{ "msg": ..., "post": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedPostResponse {
    pub msg: String,
    pub post: Post,
}
