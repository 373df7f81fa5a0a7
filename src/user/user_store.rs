use super::auth::{AuthToken, AuthTokenValue, UserPasswordCredentials};
use super::permissions::UserRole;
use super::user_models::{MusicListEntry, Notice, Playlist, PlaylistRef, UserProfile};
use anyhow::Result;

pub trait UserAuthCredentialsStore: Send + Sync {
    /// Returns the user's password credentials.
    /// Returns Ok(None) if the user has no password set.
    /// Returns Err if there is a database error.
    fn get_password_credentials(&self, user_no: usize) -> Result<Option<UserPasswordCredentials>>;

    /// Creates or replaces the user's password credentials.
    fn set_password_credentials(&self, credentials: &UserPasswordCredentials) -> Result<()>;

    /// Records a login attempt against the credentials, `succeeded` also
    /// updates the last used timestamp.
    fn record_password_attempt(&self, user_no: usize, succeeded: bool) -> Result<()>;
}

pub trait UserAuthTokenStore: Send + Sync {
    /// Returns an authentication token given its value.
    /// Returns Ok(None) if the token does not exist.
    /// Returns Err if there is a database error.
    fn get_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Deletes an auth token given the token value.
    /// Returns Ok(None) if the token does not exist.
    /// Returns Err if there is a database error.
    fn delete_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Updates an auth token with the latest timestamp.
    fn update_user_auth_token_last_used_timestamp(&self, token: &AuthTokenValue) -> Result<()>;

    /// Adds a new auth token.
    /// Returns Err if the token already exists.
    fn add_user_auth_token(&self, token: AuthToken) -> Result<()>;

    /// Deletes every token of a user, returns how many were deleted.
    fn delete_all_user_auth_tokens(&self, user_no: usize) -> Result<usize>;
}

pub trait UserStore: Send + Sync {
    /// Creates a new user and returns the user number.
    /// Returns Err if the email is already taken, deleted accounts included.
    fn create_user(&self, email: &str, nickname: &str, role: UserRole) -> Result<usize>;

    /// Returns the profile of an active user.
    /// Returns Ok(None) if the user does not exist or was deleted.
    /// Returns Err if there is a database error.
    fn get_user(&self, user_no: usize) -> Result<Option<UserProfile>>;

    /// Returns the profile of an active user given the email.
    /// Returns Ok(None) if no active user has that email.
    fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>>;

    /// Returns true if any account, deleted or not, uses the email.
    fn email_exists(&self, email: &str) -> Result<bool>;

    /// Returns every account, deleted ones included.
    fn list_users(&self) -> Result<Vec<UserProfile>>;

    /// Returns false if the user does not exist or was deleted.
    fn update_nickname(&self, user_no: usize, nickname: &str) -> Result<bool>;

    /// Returns false if the user does not exist or was deleted.
    fn set_user_role(&self, user_no: usize, role: UserRole) -> Result<bool>;

    /// Marks the user as deleted.
    /// Returns false if the user does not exist or was already deleted.
    fn soft_delete_user(&self, user_no: usize) -> Result<bool>;
}

pub trait PlaylistStore: Send + Sync {
    /// Creates a playlist and returns its number.
    fn create_playlist(&self, user_no: usize, title: &str, content: Option<&str>) -> Result<usize>;

    /// Returns Ok(None) if the playlist does not exist.
    fn get_playlist(&self, playlist_no: usize) -> Result<Option<Playlist>>;

    /// Returns every playlist, newest first.
    fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Returns the playlists owned by a user, newest first.
    fn list_user_playlists(&self, user_no: usize) -> Result<Vec<Playlist>>;

    /// Returns false if the playlist does not exist.
    fn update_playlist(&self, playlist_no: usize, title: &str, content: Option<&str>)
        -> Result<bool>;

    /// Deletes a playlist and its music list.
    /// Returns false if the playlist does not exist.
    fn delete_playlist(&self, playlist_no: usize) -> Result<bool>;

    /// Appends a track to a playlist.
    /// Returns Err if the track is already in the playlist.
    fn add_music(&self, playlist_no: usize, music_no: usize) -> Result<()>;

    fn has_music(&self, playlist_no: usize, music_no: usize) -> Result<bool>;

    /// Returns false if the track was not in the playlist.
    fn remove_music(&self, playlist_no: usize, music_no: usize) -> Result<bool>;

    /// Removes every track of a playlist, returns how many were removed.
    fn clear_music(&self, playlist_no: usize) -> Result<usize>;

    /// Returns the music list of a playlist in insertion order.
    fn list_music(&self, playlist_no: usize) -> Result<Vec<MusicListEntry>>;

    /// Returns the playlists containing a track.
    fn playlists_with_music(&self, music_no: usize) -> Result<Vec<PlaylistRef>>;

    /// Removes a track from every playlist, returns how many rows were removed.
    fn remove_music_everywhere(&self, music_no: usize) -> Result<usize>;
}

pub trait NoticeStore: Send + Sync {
    /// Creates a notice and returns its number.
    fn create_notice(&self, user_no: usize, title: &str, content: &str) -> Result<usize>;

    /// Returns Ok(None) if the notice does not exist.
    fn get_notice(&self, notice_no: usize) -> Result<Option<Notice>>;

    /// Returns every notice, newest first.
    fn list_notices(&self) -> Result<Vec<Notice>>;

    /// Returns false if the notice does not exist.
    fn update_notice(&self, notice_no: usize, title: &str, content: &str) -> Result<bool>;

    /// Returns false if the notice does not exist.
    fn delete_notice(&self, notice_no: usize) -> Result<bool>;
}

/// Everything the user manager needs from a single backing store.
pub trait FullUserStore:
    UserStore + UserAuthCredentialsStore + UserAuthTokenStore + PlaylistStore + NoticeStore
{
}

impl<T> FullUserStore for T where
    T: UserStore + UserAuthCredentialsStore + UserAuthTokenStore + PlaylistStore + NoticeStore
{
}
