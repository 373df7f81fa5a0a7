//! User data models

use super::permissions::UserRole;
use crate::catalog_store::Track;
use serde::Serialize;

/// Public view of a user account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_no: usize,
    pub role_no: i32,
    pub email: String,
    pub nickname: String,
    pub profile_url: Option<String>,
    #[serde(skip)]
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UserProfile {
    /// Unknown role numbers are treated as regular users.
    pub fn role(&self) -> UserRole {
        UserRole::from_role_no(self.role_no).unwrap_or(UserRole::Regular)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub playlist_no: usize,
    pub user_no: usize,
    pub title: String,
    pub content: Option<String>,
    /// Owner's nickname.
    pub nickname: Option<String>,
    pub music_count: usize,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A music list row: one track in one playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MusicListEntry {
    pub playlist_no: usize,
    pub music_no: usize,
    pub added_at: i64,
}

/// A music list row resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistTrack {
    pub playlist_no: usize,
    pub added_at: i64,
    #[serde(flatten)]
    pub track: Track,
}

/// A playlist that contains a given track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistRef {
    pub playlist_no: usize,
    pub music_no: usize,
    pub playlist_title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub notice_no: usize,
    pub user_no: usize,
    pub title: String,
    pub content: String,
    /// Author's nickname.
    pub nickname: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
