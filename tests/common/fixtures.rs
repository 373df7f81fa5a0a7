//! Test fixture creation for catalog and user databases

use super::constants::*;
use anyhow::{Context, Result};
use listify_server::catalog_store::{CatalogStore, NewTrack, SqliteCatalogStore};
use listify_server::user::{
    SqliteUserStore, UserAuthCredentialsStore, UserPasswordCredentials, UserRole, UserStore,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_track(
    store: &SqliteCatalogStore,
    id: &str,
    name: &str,
    artist: &str,
    genre: &str,
    release_date: &str,
    popularity: u32,
) -> Result<NewTrack> {
    Ok(NewTrack {
        spotify_track_id: Some(id.to_string()),
        track_name: name.to_string(),
        artist_name: artist.to_string(),
        album_name: format!("{} album", name),
        album_image_url: None,
        duration_ms: 200_000,
        popularity,
        spotify_url: format!("https://open.spotify.com/track/{}", id),
        preview_url: None,
        release_date: Some(release_date.to_string()),
        genre_no: store.find_genre_id_by_name(genre)?,
    })
}

/// Creates a temporary catalog with 3 tracks.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");
    let store = SqliteCatalogStore::new(&catalog_db_path)?;

    let tracks = [
        fixture_track(&store, "fixture1", TRACK_1_NAME, TRACK_1_ARTIST, "K-Pop", "2019-11-18", 80)?,
        fixture_track(&store, "fixture2", TRACK_2_NAME, TRACK_1_ARTIST, "K-Pop", "2024-01-24", 90)?,
        fixture_track(&store, "fixture3", TRACK_3_NAME, "Coldplay", "Rock", "2000-06-26", 70)?,
    ];
    for track in &tracks {
        store
            .insert_track(track)
            .with_context(|| format!("Failed to insert fixture {}", track.track_name))?;
    }

    Ok((dir, catalog_db_path))
}

fn add_user(
    store: &SqliteUserStore,
    email: &str,
    password: &str,
    nickname: &str,
    role: UserRole,
) -> Result<usize> {
    let user_no = store.create_user(email, nickname, role)?;
    let credentials = UserPasswordCredentials::create(user_no, password)?;
    store.set_password_credentials(&credentials)?;
    Ok(user_no)
}

/// Creates a temporary user database with a regular user, an admin and a
/// second regular user, in this order.
/// Returns (temp_dir, user_db_path)
pub fn create_test_db_with_users() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("user.db");
    let store = SqliteUserStore::new(&db_path)?;

    add_user(&store, TEST_USER, TEST_PASS, TEST_USER_NICKNAME, UserRole::Regular)?;
    add_user(&store, ADMIN_USER, ADMIN_PASS, ADMIN_NICKNAME, UserRole::Admin)?;
    add_user(&store, OTHER_USER, OTHER_PASS, "other", UserRole::Regular)?;

    Ok((dir, db_path))
}
