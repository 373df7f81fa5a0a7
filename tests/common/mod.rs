//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, TRACK_1_NO};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_music() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::authenticated(server.base_url.clone()).await;
//!
//!     let response = client.get_music(TRACK_1_NO).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod provider;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::{body_json, TestClient};
pub use constants::*;
pub use server::TestServer;
