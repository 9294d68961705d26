
use devconnect_backend::entities::token::AuthResponse;
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_user::*;
use test_utils::*;

#[actix_rt::test]
async fn register_user_returns_201_with_token() {
    let app = TestApp::spawn().await;

    let response = app.register_user(&valid_user()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let auth: AuthResponse = response.json().await.unwrap();
    assert!(!auth.token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
}

#[actix_rt::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.register_user(&valid_user()).await;

    let response = app.register_user(&named_user("Other", "TEST@example.com")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User already exists");
    assert_eq!(app.store.user_count(), 1);
}

#[actix_rt::test]
async fn invalid_registration_lists_every_field() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&json!({"email": "nope", "password": "123"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["email", "name", "password"]);
}

#[actix_rt::test]
async fn login_returns_a_token() {
    let app = TestApp::spawn().await;
    app.register_user(&valid_user()).await;

    let auth = app.login_user(&valid_login()).await;

    assert!(!auth.token.is_empty());
}

#[actix_rt::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.register_user(&valid_user()).await;

    let response = app.client
        .post(app.url("/api/auth"))
        .json(&invalid_login())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn unknown_email_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/auth"))
        .json(&valid_login())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn current_user_hides_password_hash() {
    let app = TestApp::spawn().await;
    let token = app.signed_in(&valid_user()).await;

    let response = app.client
        .get(app.url("/api/auth"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user: Value = response.json().await.unwrap();
    assert_eq!(user["email"], "test@example.com");
    assert!(user.get("password_hash").is_none());
}

#[actix_rt::test]
async fn current_user_requires_a_token() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/api/auth")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn health_and_banner_are_public() {
    let app = TestApp::spawn().await;

    let health: Value = app.client.get(app.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "OK");

    let banner = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(banner.status(), StatusCode::OK);
}
