//! /api/profiles integration tests

use crate::common::*;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

fn profile_body() -> Value {
    json!({
        "company": "Acme",
        "website": "https://acme.example",
        "location": "Berlin",
        "designation": "Engineer",
        "skills": "rust, sql ,  http",
        "bio": "Builds things",
        "githubUserName": "ann-dev",
        "youtube": "https://youtube.com/ann",
        "facebook": "https://facebook.com/ann",
        "twitter": "https://twitter.com/ann",
        "linkedin": "https://linkedin.com/in/ann",
        "instagram": "https://instagram.com/ann"
    })
}

async fn create_profile(server: &TestServer, token: &str) -> Value {
    let response = with_token(server.post("/api/profiles"), token)
        .json(&profile_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    body["profile"].clone()
}

#[tokio::test]
async fn test_create_profile() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    let me = user_id(&server, &token).await;

    let response = with_token(server.post("/api/profiles"), &token)
        .json(&profile_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["msg"], "Profile is Created Successfully");
    let profile = &body["profile"];
    assert_eq!(profile["user"]["id"], me.as_str());
    assert_eq!(profile["user"]["name"], "Ann");
    assert_eq!(profile["skills"], json!(["rust", "sql", "http"]));
    assert_eq!(profile["githubUserName"], "ann-dev");
    assert_eq!(profile["social"]["linkedin"], "https://linkedin.com/in/ann");
    assert_eq!(profile["experience"], json!([]));
    assert_eq!(profile["education"], json!([]));
}

#[tokio::test]
async fn test_create_profile_accepts_skill_list() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let mut body = profile_body();
    body["skills"] = json!(["rust", " tokio "]);
    let response = with_token(server.post("/api/profiles"), &token).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["profile"]["skills"], json!(["rust", "tokio"]));
}

#[tokio::test]
async fn test_create_profile_reports_every_missing_field() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let response = with_token(server.post("/api/profiles"), &token)
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 12);
    assert_eq!(errors[0]["msg"], "Company is Required");
    assert_eq!(errors[0]["param"], "company");
    assert!(errors.iter().any(|e| e["msg"] == "GithubUserName is Required"));
    assert!(errors.iter().any(|e| e["msg"] == "Skills is Required"));
}

#[tokio::test]
async fn test_duplicate_profile_rejected() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    create_profile(&server, &token).await;

    let response = with_token(server.post("/api/profiles"), &token)
        .json(&profile_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "Profile already exists");
}

#[tokio::test]
async fn test_my_profile() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let response = with_token(server.get("/api/profiles/me"), &token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "No Profile Found");

    let created = create_profile(&server, &token).await;
    let response = with_token(server.get("/api/profiles/me"), &token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["profile"]["id"], created["id"]);

    let response = server.get("/api/profiles/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let response = with_token(server.put("/api/profiles"), &token)
        .json(&profile_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let created = create_profile(&server, &token).await;
    let mut body = profile_body();
    body["company"] = json!("Globex");
    let response = with_token(server.put("/api/profiles"), &token).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["msg"], "Profile is Updated Successfully");
    assert_eq!(body["profile"]["id"], created["id"]);
    assert_eq!(body["profile"]["company"], "Globex");
}

#[tokio::test]
async fn test_public_reads() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let ann_id = user_id(&server, &ann).await;
    let ann_profile = create_profile(&server, &ann).await;
    let bob_profile = create_profile(&server, &bob).await;

    let response = server.get(&format!("/api/profiles/users/{ann_id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["profile"]["id"], ann_profile["id"]);

    let path = format!("/api/profiles/{}", bob_profile["id"].as_str().unwrap());
    let body: Value = server.get(&path).await.json();
    assert_eq!(body["profile"]["user"]["name"], "Bob");

    let body: Value = server.get("/api/profiles/all").await.json();
    let ids: Vec<&Value> = body["profiles"].as_array().unwrap().iter().map(|p| &p["id"]).collect();
    assert_eq!(ids, vec![&ann_profile["id"], &bob_profile["id"]]);
}

#[tokio::test]
async fn test_public_reads_missing() {
    let server = test_server().await;

    for path in [
        format!("/api/profiles/users/{}", Uuid::new_v4()),
        "/api/profiles/users/garbage".to_string(),
        format!("/api/profiles/{}", Uuid::new_v4()),
    ] {
        let response = server.get(&path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        let body: Value = response.json();
        assert_eq!(first_error(&body), "No Profile Found for this user");
    }

    let body: Value = server.get("/api/profiles/all").await.json();
    assert_eq!(body["profiles"], json!([]));
}

#[tokio::test]
async fn test_experience_add_and_delete() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;

    let entry = json!({
        "title": "Junior",
        "company": "Acme",
        "location": "Berlin",
        "from": "2019-01-01",
        "current": true,
        "description": "First job"
    });

    let response = with_token(server.put("/api/profiles/experience"), &token)
        .json(&entry)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    create_profile(&server, &token).await;
    with_token(server.put("/api/profiles/experience"), &token).json(&entry).await;

    let mut second = entry.clone();
    second["title"] = json!("Senior");
    second["to"] = json!("2024-01-01");
    second["current"] = json!(false);
    let response = with_token(server.put("/api/profiles/experience"), &token)
        .json(&second)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let experience = body["profile"]["experience"].as_array().unwrap();
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0]["title"], "Senior");
    assert_eq!(experience[0]["to"], "2024-01-01");
    assert_eq!(experience[1]["to"], Value::Null);
    assert_eq!(experience[1]["current"], true);

    let junior = experience[1]["id"].as_str().unwrap().to_string();
    let path = format!("/api/profiles/experience/{junior}");
    let response = with_token(server.delete(&path), &token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["msg"], "Experience is Deleted");
    assert_eq!(body["profile"]["experience"].as_array().unwrap().len(), 1);
    assert_eq!(body["profile"]["experience"][0]["title"], "Senior");

    let response = with_token(server.delete(&path), &token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "No Experience Found");
}

#[tokio::test]
async fn test_experience_validation() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    create_profile(&server, &token).await;

    let response = with_token(server.put("/api/profiles/experience"), &token)
        .json(&json!({ "title": "Junior" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(
        msgs,
        vec![
            "Company is Required",
            "Location is Required",
            "From is Required",
            "Description is Required"
        ]
    );
}

#[tokio::test]
async fn test_education_add_and_delete() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    create_profile(&server, &token).await;

    let response = with_token(server.put("/api/profiles/education"), &token)
        .json(&json!({
            "school": "TU Berlin",
            "degree": "MSc",
            "fieldOfStudy": "Computer Science",
            "from": "2015-10-01",
            "to": "2018-09-30",
            "description": "Distributed systems"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let education = &body["profile"]["education"][0];
    assert_eq!(education["fieldOfStudy"], "Computer Science");
    assert_eq!(education["current"], false);

    let path = format!("/api/profiles/education/{}", education["id"].as_str().unwrap());
    let response = with_token(server.delete(&path), &token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["msg"], "Education is Deleted");
    assert_eq!(body["profile"]["education"], json!([]));

    let response = with_token(server.delete("/api/profiles/education/nope"), &token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "No Education Found");
}

#[tokio::test]
async fn test_education_validation() {
    let server = test_server().await;
    let token = register_and_login(&server, "Ann", "ann@x.com").await;
    create_profile(&server, &token).await;

    let response = with_token(server.put("/api/profiles/education"), &token)
        .json(&json!({ "school": "TU Berlin", "degree": "MSc", "from": "2015", "description": "d" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "FieldOfStudy is Required");
    assert_eq!(body["errors"][0]["param"], "fieldOfStudy");
}

#[tokio::test]
async fn test_delete_own_account() {
    let server = test_server().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let ann_id = user_id(&server, &ann).await;
    create_profile(&server, &ann).await;

    let body: Value = with_token(server.post("/api/posts"), &ann)
        .json(&json!({ "text": "bye", "image": "i" }))
        .await
        .json();
    let ann_post = body["post"]["id"].as_str().unwrap().to_string();

    let body: Value = with_token(server.post("/api/posts"), &bob)
        .json(&json!({ "text": "hi", "image": "i" }))
        .await
        .json();
    let bob_post = body["post"]["id"].as_str().unwrap().to_string();
    with_token(server.put(&format!("/api/posts/like/{bob_post}")), &ann).await;
    with_token(server.post(&format!("/api/posts/comment/{bob_post}")), &ann)
        .json(&json!({ "text": "nice" }))
        .await;

    let path = format!("/api/profiles/users/{ann_id}");
    let response = with_token(server.delete(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["msg"], "Account is Deleted");

    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);

    let response = with_token(server.get(&format!("/api/posts/{ann_post}")), &bob).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = with_token(server.get(&format!("/api/posts/{bob_post}")), &bob)
        .await
        .json();
    assert_eq!(body["post"]["likes"], json!([]));
    assert_eq!(body["post"]["comments"], json!([]));

    let response = server
        .post("/api/users/login")
        .json(&json!({ "email": "ann@x.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_other_account_requires_admin() {
    let (server, pool) = test_server_with_pool().await;
    let ann = register_and_login(&server, "Ann", "ann@x.com").await;
    let bob = register_and_login(&server, "Bob", "bob@x.com").await;
    let bob_id = user_id(&server, &bob).await;
    let path = format!("/api/profiles/users/{bob_id}");

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = with_token(server.delete(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "User is not authorized");

    sqlx::query("UPDATE users SET is_admin = 1 WHERE email = ?")
        .bind("ann@x.com")
        .execute(&pool)
        .await
        .unwrap();

    let response = with_token(server.delete(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = with_token(server.delete(&path), &ann).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(first_error(&body), "No User Found");
}
