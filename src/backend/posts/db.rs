//! Database operations for posts
//!
//! Posts live in `posts`; likes and comments in their own tables keyed by
//! post id. Reads assemble the nested document the API returns.
//!
//! Writes that touch more than one table run in a transaction, and the pool
//! is not used again until that transaction is finished.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::posts::types::{Comment, Like, Post};

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    image: String,
    name: String,
    avatar: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, likes: Vec<Like>, comments: Vec<Comment>) -> Post {
        Post {
            id: self.id,
            user: self.user_id,
            text: self.text,
            image: self.image,
            name: self.name,
            avatar: self.avatar,
            likes,
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Comment row including the post it belongs to
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            date: row.date,
        }
    }
}

fn like_from_row(row: &SqliteRow) -> Result<(Uuid, Like), sqlx::Error> {
    Ok((
        row.try_get("post_id")?,
        Like {
            user: row.try_get("user_id")?,
        },
    ))
}

/// Create a post authored by `author`, copying their name and avatar
pub async fn create_post(
    pool: &SqlitePool,
    author: &User,
    text: &str,
    image: &str,
) -> Result<Post, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (id, user_id, text, image, name, avatar, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, text, image, name, avatar, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author.id)
    .bind(text)
    .bind(image)
    .bind(&author.name)
    .bind(&author.avatar)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into_post(Vec::new(), Vec::new()))
}

/// Get a post with its likes and comments
pub async fn get_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, image, name, avatar, created_at, updated_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let likes = sqlx::query("SELECT post_id, user_id FROM post_likes WHERE post_id = ? ORDER BY rowid DESC")
        .bind(post_id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(|r| like_from_row(r).map(|(_, like)| like))
        .collect::<Result<Vec<_>, _>>()?;

    let comments = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT id, post_id, user_id, text, name, avatar, date
        FROM post_comments
        WHERE post_id = ?
        ORDER BY rowid DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(Comment::from)
    .collect();

    Ok(Some(row.into_post(likes, comments)))
}

/// All posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, text, image, name, avatar, created_at, updated_at
        FROM posts
        ORDER BY rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut likes: HashMap<Uuid, Vec<Like>> = HashMap::new();
    for row in sqlx::query("SELECT post_id, user_id FROM post_likes ORDER BY rowid DESC")
        .fetch_all(pool)
        .await?
    {
        let (post_id, like) = like_from_row(&row)?;
        likes.entry(post_id).or_default().push(like);
    }

    let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for row in sqlx::query_as::<_, CommentRow>(
        "SELECT id, post_id, user_id, text, name, avatar, date FROM post_comments ORDER BY rowid DESC",
    )
    .fetch_all(pool)
    .await?
    {
        comments.entry(row.post_id).or_default().push(row.into());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            row.into_post(
                likes.remove(&id).unwrap_or_default(),
                comments.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

/// Delete a post and everything attached to it
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM post_likes WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM post_comments WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    let removed = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(removed > 0)
}

/// Record a like and bump the post's `updated_at`
///
/// A second like by the same user fails with a unique-constraint error and
/// leaves the post untouched.
pub async fn add_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(post_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    touch_post(&mut tx, post_id, now).await?;

    tx.commit().await
}

/// Remove a like; `false` when the user had not liked the post
pub async fn remove_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    touch_post(&mut tx, post_id, now).await?;
    tx.commit().await?;
    Ok(true)
}

/// Add a comment by `author` and bump the post's `updated_at`
pub async fn add_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author: &User,
    text: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO post_comments (id, post_id, user_id, text, name, avatar, date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author.id)
    .bind(text)
    .bind(&author.name)
    .bind(&author.avatar)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    touch_post(&mut tx, post_id, now).await?;

    tx.commit().await?;
    Ok(id)
}

pub async fn get_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT id, post_id, user_id, text, name, avatar, date
        FROM post_comments
        WHERE id = ? AND post_id = ?
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Delete exactly the addressed comment
pub async fn delete_comment(pool: &SqlitePool, post_id: Uuid, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_comments WHERE id = ? AND post_id = ?")
        .bind(comment_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed > 0 {
        touch_post(&mut tx, post_id, now).await?;
    }

    tx.commit().await?;
    Ok(removed > 0)
}

async fn touch_post(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    post_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(post_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
