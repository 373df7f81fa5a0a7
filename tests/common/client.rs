//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all listify-server endpoints.
//!
//! When API routes or request formats change, update only this file.
#![allow(dead_code)]

use super::constants::*;
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    response
        .json::<Value>()
        .await
        .expect("Response body is not JSON")
}

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// When set, sent as `Authorization: Bearer <token>` instead of relying on cookies
    pub bearer_token: Option<String>,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for testing authentication flows.
    /// For most tests, use `authenticated()` or `authenticated_admin()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            bearer_token: None,
        }
    }

    /// Creates a client with no cookie store that authenticates with a bearer token.
    pub fn with_bearer(base_url: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            bearer_token: Some(token),
        }
    }

    async fn logged_in_as(base_url: String, email: &str, password: &str) -> Self {
        let client = Self::new(base_url);

        let response = client.login(email, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Authentication of {} failed: {:?}",
            email,
            response.text().await
        );

        client
    }

    /// Creates a client pre-authenticated as the regular test user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        Self::logged_in_as(base_url, TEST_USER, TEST_PASS).await
    }

    /// Creates a client pre-authenticated as the admin user
    pub async fn authenticated_admin(base_url: String) -> Self {
        Self::logged_in_as(base_url, ADMIN_USER, ADMIN_PASS).await
    }

    /// Creates a client pre-authenticated as the second regular user
    pub async fn authenticated_other(base_url: String) -> Self {
        Self::logged_in_as(base_url, OTHER_USER, OTHER_PASS).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Response {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.expect("Request failed")
    }

    async fn get(&self, path: &str) -> Response {
        self.send(self.client.get(self.url(path))).await
    }

    async fn delete(&self, path: &str) -> Response {
        self.send(self.client.delete(self.url(path))).await
    }

    async fn post_json(&self, path: &str, body: Value) -> Response {
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn put_json(&self, path: &str, body: Value) -> Response {
        self.send(self.client.put(self.url(path)).json(&body)).await
    }

    // ========================================================================
    // Service Endpoints
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.get("/").await
    }

    /// GET /health
    pub async fn health(&self) -> Response {
        self.get("/health").await
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /auth/register
    pub async fn register(&self, email: &str, password: &str, nickname: &str) -> Response {
        self.post_json(
            "/auth/register",
            json!({ "email": email, "password": password, "nickname": nickname }),
        )
        .await
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/auth/login",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// GET /auth/logout
    pub async fn logout(&self) -> Response {
        self.get("/auth/logout").await
    }

    /// GET /auth/verify
    pub async fn verify(&self) -> Response {
        self.get("/auth/verify").await
    }

    // ========================================================================
    // Music Endpoints
    // ========================================================================

    /// GET /music/search?q=&limit=&page=
    pub async fn search_music(&self, query: &str, limit: usize, page: usize) -> Response {
        self.send(
            self.client
                .get(self.url("/music/search"))
                .query(&[("q", query.to_string()), ("limit", limit.to_string()), ("page", page.to_string())]),
        )
        .await
    }

    /// GET /music/search/db?q=
    pub async fn search_music_in_db(&self, query: &str) -> Response {
        self.send(self.client.get(self.url("/music/search/db")).query(&[("q", query)]))
            .await
    }

    /// POST /music/bulk-import
    pub async fn bulk_import(&self, query: &str, count: Option<usize>) -> Response {
        let body = match count {
            Some(count) => json!({ "query": query, "count": count }),
            None => json!({ "query": query }),
        };
        self.post_json("/music/bulk-import", body).await
    }

    /// GET /music/top50
    pub async fn top50(&self) -> Response {
        self.get("/music/top50").await
    }

    /// GET /music?limit=&offset=
    pub async fn list_music(&self, limit: usize, offset: usize) -> Response {
        self.get(&format!("/music?limit={}&offset={}", limit, offset))
            .await
    }

    /// GET /music/genres
    pub async fn list_genres(&self) -> Response {
        self.get("/music/genres").await
    }

    /// GET /music/category?category=&value=
    pub async fn music_by_category(&self, category: &str, value: &str) -> Response {
        self.send(
            self.client
                .get(self.url("/music/category"))
                .query(&[("category", category), ("value", value)]),
        )
        .await
    }

    /// GET /music/{music_no}
    pub async fn get_music(&self, music_no: usize) -> Response {
        self.get(&format!("/music/{}", music_no)).await
    }

    /// DELETE /music/{music_no}
    pub async fn delete_music(&self, music_no: usize) -> Response {
        self.delete(&format!("/music/{}", music_no)).await
    }

    // ========================================================================
    // Playlist Endpoints
    // ========================================================================

    /// POST /playlist
    pub async fn create_playlist(&self, title: &str, content: Option<&str>) -> Response {
        self.post_json("/playlist", json!({ "title": title, "content": content }))
            .await
    }

    /// GET /playlist
    pub async fn list_playlists(&self) -> Response {
        self.get("/playlist").await
    }

    /// GET /playlist/{playlist_no}
    pub async fn get_playlist(&self, playlist_no: usize) -> Response {
        self.get(&format!("/playlist/{}", playlist_no)).await
    }

    /// PUT /playlist/{playlist_no}
    pub async fn update_playlist(&self, playlist_no: usize, title: &str) -> Response {
        self.put_json(
            &format!("/playlist/{}", playlist_no),
            json!({ "title": title }),
        )
        .await
    }

    /// DELETE /playlist/{playlist_no}
    pub async fn delete_playlist(&self, playlist_no: usize) -> Response {
        self.delete(&format!("/playlist/{}", playlist_no)).await
    }

    /// GET /playlist/user/{user_no}
    pub async fn user_playlists(&self, user_no: usize) -> Response {
        self.get(&format!("/playlist/user/{}", user_no)).await
    }

    /// POST /playlist/{playlist_no}/music
    pub async fn add_music(&self, playlist_no: usize, music_no: usize) -> Response {
        self.post_json(
            &format!("/playlist/{}/music", playlist_no),
            json!({ "music_no": music_no }),
        )
        .await
    }

    /// GET /playlist/{playlist_no}/music
    pub async fn playlist_music(&self, playlist_no: usize) -> Response {
        self.get(&format!("/playlist/{}/music", playlist_no)).await
    }

    /// DELETE /playlist/{playlist_no}/music/{music_no}
    pub async fn remove_music(&self, playlist_no: usize, music_no: usize) -> Response {
        self.delete(&format!("/playlist/{}/music/{}", playlist_no, music_no))
            .await
    }

    /// DELETE /playlist/{playlist_no}/music
    pub async fn clear_music(&self, playlist_no: usize) -> Response {
        self.delete(&format!("/playlist/{}/music", playlist_no))
            .await
    }

    /// GET /playlist/by-music/{music_no}
    pub async fn playlists_by_music(&self, music_no: usize) -> Response {
        self.get(&format!("/playlist/by-music/{}", music_no)).await
    }

    // ========================================================================
    // Notice Endpoints
    // ========================================================================

    /// POST /notice
    pub async fn create_notice(&self, title: &str, content: &str) -> Response {
        self.post_json("/notice", json!({ "title": title, "content": content }))
            .await
    }

    /// GET /notice
    pub async fn list_notices(&self) -> Response {
        self.get("/notice").await
    }

    /// GET /notice/{notice_no}
    pub async fn get_notice(&self, notice_no: usize) -> Response {
        self.get(&format!("/notice/{}", notice_no)).await
    }

    /// PUT /notice/{notice_no}
    pub async fn update_notice(&self, notice_no: usize, title: &str, content: &str) -> Response {
        self.put_json(
            &format!("/notice/{}", notice_no),
            json!({ "title": title, "content": content }),
        )
        .await
    }

    /// DELETE /notice/{notice_no}
    pub async fn delete_notice(&self, notice_no: usize) -> Response {
        self.delete(&format!("/notice/{}", notice_no)).await
    }

    // ========================================================================
    // User Endpoints
    // ========================================================================

    /// GET /users/{user_no}/profile
    pub async fn get_profile(&self, user_no: usize) -> Response {
        self.get(&format!("/users/{}/profile", user_no)).await
    }

    /// PUT /users/{user_no}/profile
    pub async fn update_profile(&self, user_no: usize, nickname: &str) -> Response {
        self.put_json(
            &format!("/users/{}/profile", user_no),
            json!({ "nickname": nickname }),
        )
        .await
    }

    /// DELETE /users/{user_no}
    pub async fn delete_user(&self, user_no: usize) -> Response {
        self.delete(&format!("/users/{}", user_no)).await
    }
}
