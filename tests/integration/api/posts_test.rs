//! /api/posts integration tests

use crate::common::*;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_post(server: &TestServer, token: &str, text: &str) -> Value {
    let response = with_token(server.post("/api/posts"), token)
        .json(&json!({ "text": text, "image": "https://img.example/1.png" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    body["post"].clone()
}

#[tokio::test]
async fn test_posts_require_token() {
    let server = test_server().await;
    let response = server.get("/api/posts").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/posts")
        .json(&json!({ "text": "t", "image": "i" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_snapshots_author() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    let me = user_id(&server, &token).await;

    let post = create_post(&server, &token, "hello").await;
    assert_eq!(post["user"], me.as_str());
    assert_eq!(post["name"], "Ann");
    assert_eq!(post["text"], "hello");
    assert_eq!(post["likes"], json!([]));
    assert_eq!(post["comments"], json!([]));
    assert!(post["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_post_validation() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let response = with_token(server.post("/api/posts"), &token)
        .json(&json!({ "text": "  " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(msgs, vec!["Text is Required", "Image is Required"]);
}

#[tokio::test]
async fn test_list_and_get_posts() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    let first = create_post(&server, &token, "first").await;
    let second = create_post(&server, &token, "second").await;

    let body: Value = with_token(server.get("/api/posts"), &token).await.json();
    let ids: Vec<&Value> = body["posts"].as_array().unwrap().iter().map(|p| &p["id"]).collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);

    let path = format!("/api/posts/{}", first["id"].as_str().unwrap());
    let response = with_token(server.get(&path), &token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["post"]["text"], "first");
}

#[tokio::test]
async fn test_get_missing_post() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let response = with_token(server.get(&format!("/api/posts/{id}")), &token).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(first_error(&body), "No Post Found");
    }
}

#[tokio::test]
async fn test_delete_post_only_by_author() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let post = create_post(&server, &ann, "mine").await;
    let path = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let response = with_token(server.delete(&path), &bob).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "User is not authorized");

    let response = with_token(server.delete(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["msg"], "Post is Deleted");
    assert_eq!(body["post"]["id"], post["id"]);

    let response = with_token(server.get(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_twice_rejected() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let bob_id = user_id(&server, &bob).await;
    let post = create_post(&server, &ann, "like me").await;
    let path = format!("/api/posts/like/{}", post["id"].as_str().unwrap());

    let response = with_token(server.put(&path), &bob).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["post"]["likes"], json!([{ "user": bob_id }]));

    let response = with_token(server.put(&path), &bob).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "Post has already been liked");

    let path = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let body: Value = with_token(server.get(&path), &ann).await.json();
    assert_eq!(body["post"]["likes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unlike() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let post = create_post(&server, &ann, "post").await;
    let id = post["id"].as_str().unwrap();

    let response = with_token(server.put(&format!("/api/posts/unlike/{id}")), &ann).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "Post has not been liked");

    with_token(server.put(&format!("/api/posts/like/{id}")), &ann).await;
    let response = with_token(server.put(&format!("/api/posts/unlike/{id}")), &ann).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["post"]["likes"], json!([]));
}

#[tokio::test]
async fn test_like_missing_post() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let response = with_token(
        server.put(&format!("/api/posts/like/{}", Uuid::new_v4())),
        &ann,
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_newest_first() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let post = create_post(&server, &ann, "discuss").await;
    let path = format!("/api/posts/comment/{}", post["id"].as_str().unwrap());

    with_token(server.post(&path), &bob).json(&json!({ "text": "first" })).await;
    let response = with_token(server.post(&path), &ann)
        .json(&json!({ "text": "second" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let comments = body["post"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "second");
    assert_eq!(comments[0]["name"], "Ann");
    assert_eq!(comments[1]["name"], "Bob");
}

#[tokio::test]
async fn test_comment_validation() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let post = create_post(&server, &ann, "discuss").await;
    let path = format!("/api/posts/comment/{}", post["id"].as_str().unwrap());

    let response = with_token(server.post(&path), &ann).json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "Text is Required");
}

#[tokio::test]
async fn test_delete_comment_removes_addressed_comment() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let post = create_post(&server, &ann, "discuss").await;
    let post_id = post["id"].as_str().unwrap();
    let path = format!("/api/posts/comment/{post_id}");

    with_token(server.post(&path), &ann).json(&json!({ "text": "older" })).await;
    let body: Value = with_token(server.post(&path), &ann)
        .json(&json!({ "text": "newer" }))
        .await
        .json();
    let comments = body["post"]["comments"].as_array().unwrap();
    let older_id = comments[1]["id"].as_str().unwrap().to_string();
    let newer_id = comments[0]["id"].as_str().unwrap().to_string();

    let response = with_token(server.delete(&format!("{path}/{older_id}")), &ann).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let remaining: Vec<&str> = body["post"]["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(remaining, vec![newer_id.as_str()]);
}

#[tokio::test]
async fn test_delete_comment_checks_author_and_existence() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let post = create_post(&server, &ann, "discuss").await;
    let path = format!("/api/posts/comment/{}", post["id"].as_str().unwrap());

    let body: Value = with_token(server.post(&path), &ann)
        .json(&json!({ "text": "ann says" }))
        .await
        .json();
    let comment_id = body["post"]["comments"][0]["id"].as_str().unwrap().to_string();

    let response = with_token(server.delete(&format!("{path}/{comment_id}")), &bob).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "User is not authorized");

    let response = with_token(server.delete(&format!("{path}/{}", Uuid::new_v4())), &ann).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "Comment not exists");
}
