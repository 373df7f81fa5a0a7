//! End-to-end tests for playlists and their music lists

mod common;

use common::*;
use reqwest::StatusCode;

async fn create_playlist(client: &TestClient, title: &str) -> usize {
    let response = client.create_playlist(title, Some("description")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["playlist_no"].as_u64().unwrap() as usize
}

#[tokio::test]
async fn test_create_and_get_playlist() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;

    let response = client.create_playlist("Morning", Some("wake up")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Morning");
    assert_eq!(json["data"]["user_no"], TEST_USER_NO);
    assert_eq!(json["data"]["music_count"], 0);
    let playlist_no = json["data"]["playlist_no"].as_u64().unwrap() as usize;

    // Reads are public
    let anonymous = TestClient::new(server.base_url.clone());
    let json = body_json(anonymous.get_playlist(playlist_no).await).await;
    assert_eq!(json["data"]["content"], "wake up");
    assert_eq!(json["data"]["nickname"], TEST_USER_NICKNAME);

    let json = body_json(anonymous.list_playlists().await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(anonymous.user_playlists(TEST_USER_NO).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    let json = body_json(anonymous.user_playlists(OTHER_USER_NO).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = anonymous.get_playlist(playlist_no + 100).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_playlist_validates_title() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;

    let response = client.create_playlist("   ", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.create_playlist(&"x".repeat(41), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.create_playlist(&"x".repeat(40), None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_only_owner_can_modify_playlist() {
    let server = TestServer::spawn().await;
    let owner = TestClient::authenticated(server.base_url.clone()).await;
    let other = TestClient::authenticated_other(server.base_url.clone()).await;
    let playlist_no = create_playlist(&owner, "Mine").await;

    let response = other.update_playlist(playlist_no, "Stolen").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = other.add_music(playlist_no, TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = other.delete_playlist(playlist_no).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing playlists are reported before ownership
    let response = other.update_playlist(playlist_no + 100, "Nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = owner.update_playlist(playlist_no, "Renamed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Renamed");

    let response = owner.delete_playlist(playlist_no).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = owner.get_playlist(playlist_no).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_music_list_operations() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;
    let playlist_no = create_playlist(&client, "Mix").await;

    let response = client.add_music(playlist_no, TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = client.add_music(playlist_no, TRACK_3_NO).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Duplicates and unknown tracks are rejected
    let response = client.add_music(playlist_no, TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = client.add_music(playlist_no, MISSING_MUSIC_NO).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(client.playlist_music(playlist_no).await).await;
    let tracks = json["data"].as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().any(|t| t["track_name"] == TRACK_3_NAME));

    let json = body_json(client.get_playlist(playlist_no).await).await;
    assert_eq!(json["data"]["music_count"], 2);

    let response = client.remove_music(playlist_no, TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = client.remove_music(playlist_no, TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.clear_music(playlist_no).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(client.playlist_music(playlist_no).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_playlists_by_music() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;
    let first = create_playlist(&client, "First").await;
    let second = create_playlist(&client, "Second").await;
    client.add_music(first, TRACK_2_NO).await;
    client.add_music(second, TRACK_2_NO).await;

    let json = body_json(client.playlists_by_music(TRACK_2_NO).await).await;
    let refs = json["data"].as_array().unwrap();
    assert_eq!(refs.len(), 2);
    assert!(refs.iter().any(|r| r["playlist_title"] == "Second"));

    let json = body_json(client.playlists_by_music(TRACK_3_NO).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleted_music_leaves_playlists() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;
    let admin = TestClient::authenticated_admin(server.base_url.clone()).await;
    let playlist_no = create_playlist(&client, "Doomed").await;
    client.add_music(playlist_no, TRACK_1_NO).await;
    client.add_music(playlist_no, TRACK_2_NO).await;

    let response = admin.delete_music(TRACK_1_NO).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(client.playlist_music(playlist_no).await).await;
    let tracks = json["data"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["music_no"], TRACK_2_NO);

    let json = body_json(client.playlists_by_music(TRACK_1_NO).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_music_requires_music_no() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;
    let playlist_no = create_playlist(&client, "Empty").await;

    let response = client
        .client
        .post(format!("{}/playlist/{}/music", server.base_url, playlist_no))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
