//! Integration tests for login

mod common;

use axum::http::StatusCode;
use bloglist_backend::auth::Claims;
use serde_json::json;

#[tokio::test]
async fn test_login_returns_token_for_user() {
    let app = common::TestApp::new();
    let user = app.register("mluukkai", "salainen").await;

    let response = app
        .post("/api/login", json!({ "username": "mluukkai", "password": "salainen" }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["username"], "mluukkai");
    assert_eq!(body["name"], "Test User");

    let claims: Claims = app
        .state
        .jwt()
        .verify_token(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, user["id"].as_str().unwrap());
    assert_eq!(claims.username, "mluukkai");
    assert_eq!(claims.exp - claims.iat, 60 * 60 * 24);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = common::TestApp::new();
    app.register("mluukkai", "salainen").await;

    let response = app
        .post("/api/login", json!({ "username": "mluukkai", "password": "wrong" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.json()["error"]["message"].is_string());
}

#[tokio::test]
async fn test_login_unknown_user_unauthorized() {
    let app = common::TestApp::new();

    let response = app
        .post("/api/login", json!({ "username": "nobody", "password": "salainen" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_issued_token_authorizes_blog_creation() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let response = app
        .post(
            "/api/blogs",
            json!({ "title": "Authorized", "url": "http://example.com" }),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}
