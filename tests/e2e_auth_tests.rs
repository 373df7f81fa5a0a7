//! End-to-end tests for registration, login and session handling
//!
//! Covers cookie and bearer sessions, logout revocation and the
//! service endpoints.

mod common;

use common::{body_json, TestClient, TestServer, ADMIN_USER, ADMIN_PASS, TEST_PASS, TEST_USER};
use common::{TEST_USER_NICKNAME, TEST_USER_NO};
use reqwest::StatusCode;

#[tokio::test]
async fn test_home_lists_endpoints() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.home().await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Listify Spotify API");
    assert!(json["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "/playlist"));
}

#[tokio::test]
async fn test_health_reports_provider_availability() {
    let server = TestServer::spawn().await;
    let json = body_json(TestClient::new(server.base_url.clone()).health().await).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["spotify"], true);

    let bare = TestServer::spawn_without_provider().await;
    let json = body_json(TestClient::new(bare.base_url.clone()).health().await).await;
    assert_eq!(json["spotify"], false);
}

#[tokio::test]
async fn test_login_success_returns_token_and_cookie() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get("set-cookie").is_some());

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["token_type"], "bearer");
    assert_eq!(json["data"]["user_no"], TEST_USER_NO);
    assert_eq!(json["data"]["nickname"], TEST_USER_NICKNAME);
    assert!(!json["data"]["access_token"].as_str().unwrap().is_empty());

    // The cookie store now carries the session
    let response = client.verify().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .login(&format!("  {}  ", TEST_USER.to_uppercase()), TEST_PASS)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());

    let response = client.login("nobody@listify.test", TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_authenticates() {
    let server = TestServer::spawn().await;
    let login = body_json(
        TestClient::new(server.base_url.clone())
            .login(ADMIN_USER, ADMIN_PASS)
            .await,
    )
    .await;
    let token = login["data"]["access_token"].as_str().unwrap().to_string();

    let client = TestClient::with_bearer(server.base_url.clone(), token);
    let response = client.verify().await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["role_no"], 2);
}

#[tokio::test]
async fn test_invalid_bearer_token_is_unauthorized() {
    let server = TestServer::spawn().await;
    let client = TestClient::with_bearer(server.base_url.clone(), "not-a-token".to_string());

    let response = client.verify().await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let server = TestServer::spawn().await;
    let login = body_json(
        TestClient::new(server.base_url.clone())
            .login(TEST_USER, TEST_PASS)
            .await,
    )
    .await;
    let token = login["data"]["access_token"].as_str().unwrap().to_string();
    let client = TestClient::with_bearer(server.base_url.clone(), token);

    let response = client.logout().await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.verify().await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .register("New.User@listify.test", "newpass123", "newbie")
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "new.user@listify.test");
    assert_eq!(json["data"]["role_no"], 1);
    assert!(json["data"].get("password").is_none());

    let response = client.login("new.user@listify.test", "newpass123").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    // Duplicate email
    let response = client.register(TEST_USER, "whatever123", "dup").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Short password
    let response = client.register("short@listify.test", "short", "s").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed email
    let response = client.register("not-an-email", "longenough1", "x").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty nickname
    let response = client.register("nick@listify.test", "longenough1", " ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
