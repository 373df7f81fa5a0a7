use super::{
    auth::{AuthToken, AuthTokenValue, UserPasswordCredentials},
    permissions::{Permission, UserRole},
    user_models::{Notice, Playlist, PlaylistRef, PlaylistTrack, UserProfile},
    FullUserStore,
};
use crate::catalog_store::CatalogStore;
use std::{sync::Arc, time::SystemTime};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MAX_PLAYLIST_TITLE_CHARS: usize = 40;
pub const MAX_NICKNAME_CHARS: usize = 30;
pub const MAX_NOTICE_TITLE_CHARS: usize = 100;
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Error)]
pub enum UserManagerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type UserManagerResult<T> = Result<T, UserManagerError>;

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_no: usize,
    pub role: UserRole,
}

impl Caller {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }

    fn is_self_or_admin(&self, user_no: usize) -> bool {
        self.user_no == user_no || self.has_permission(Permission::ManageUsers)
    }
}

pub struct UserManager {
    catalog_store: Arc<dyn CatalogStore>,
    user_store: Arc<dyn FullUserStore>,
}

fn validation<T>(message: impl Into<String>) -> UserManagerResult<T> {
    Err(UserManagerError::Validation(message.into()))
}

fn require_text(field: &str, value: &str, max_chars: usize) -> UserManagerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return validation(format!("{} is required", field));
    }
    if value.chars().count() > max_chars {
        return validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        ));
    }
    Ok(value.to_string())
}

fn validate_password(password: &str) -> UserManagerResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
    Ok(())
}

fn normalize_email(email: &str) -> UserManagerResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => validation("a valid email is required"),
    }
}

impl UserManager {
    pub fn new(catalog_store: Arc<dyn CatalogStore>, user_store: Arc<dyn FullUserStore>) -> Self {
        Self {
            catalog_store,
            user_store,
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Creates a regular user with password credentials.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> UserManagerResult<UserProfile> {
        self.add_user(email, password, nickname, UserRole::Regular)
    }

    pub fn add_user(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
        role: UserRole,
    ) -> UserManagerResult<UserProfile> {
        let email = normalize_email(email)?;
        let nickname = require_text("nickname", nickname, MAX_NICKNAME_CHARS)?;
        validate_password(password)?;

        if self.user_store.email_exists(&email)? {
            return validation("email is already registered");
        }

        let user_no = self.user_store.create_user(&email, &nickname, role)?;
        let credentials = UserPasswordCredentials::create(user_no, password)?;
        self.user_store.set_password_credentials(&credentials)?;
        info!("Created {} user {} ({})", role.as_str(), user_no, email);

        self.get_profile(user_no)
    }

    /// Checks the password and issues a new auth token.
    pub fn login(&self, email: &str, password: &str) -> UserManagerResult<(UserProfile, AuthToken)> {
        let invalid = || UserManagerError::Unauthorized("invalid email or password".to_string());

        let email = email.trim().to_lowercase();
        let user = self
            .user_store
            .get_user_by_email(&email)?
            .ok_or_else(invalid)?;
        let credentials = self
            .user_store
            .get_password_credentials(user.user_no)?
            .ok_or_else(invalid)?;

        let verified = credentials.verify(password)?;
        self.user_store
            .record_password_attempt(user.user_no, verified)?;
        if !verified {
            debug!("Wrong password for user {}", user.user_no);
            return Err(invalid());
        }

        let token = AuthToken {
            user_no: user.user_no,
            created: SystemTime::now(),
            last_used: None,
            value: AuthTokenValue::generate(),
        };
        self.user_store.add_user_auth_token(token.clone())?;
        Ok((user, token))
    }

    /// Returns false if the token did not exist.
    pub fn logout(&self, token: &AuthTokenValue) -> UserManagerResult<bool> {
        Ok(self.user_store.delete_user_auth_token(token)?.is_some())
    }

    /// Resolves a bearer token to the active user owning it.
    pub fn authenticate(&self, token: &AuthTokenValue) -> UserManagerResult<Option<UserProfile>> {
        let Some(auth_token) = self.user_store.get_user_auth_token(token)? else {
            return Ok(None);
        };
        let Some(user) = self.user_store.get_user(auth_token.user_no)? else {
            return Ok(None);
        };
        if let Err(err) = self
            .user_store
            .update_user_auth_token_last_used_timestamp(token)
        {
            warn!("Failed to update token last used timestamp: {:#}", err);
        }
        Ok(Some(user))
    }

    pub fn get_profile(&self, user_no: usize) -> UserManagerResult<UserProfile> {
        self.user_store
            .get_user(user_no)?
            .ok_or_else(|| UserManagerError::NotFound(format!("user {} not found", user_no)))
    }

    pub fn update_nickname(
        &self,
        caller: &Caller,
        user_no: usize,
        nickname: &str,
    ) -> UserManagerResult<UserProfile> {
        if !caller.is_self_or_admin(user_no) {
            return Err(UserManagerError::Forbidden(
                "only the user or an administrator can edit this profile".to_string(),
            ));
        }
        self.get_profile(user_no)?;
        let nickname = require_text("nickname", nickname, MAX_NICKNAME_CHARS)?;
        if !self.user_store.update_nickname(user_no, &nickname)? {
            return Err(UserManagerError::NotFound(format!(
                "user {} not found",
                user_no
            )));
        }
        self.get_profile(user_no)
    }

    /// Soft deletes an account and revokes all its tokens.
    pub fn delete_account(&self, caller: &Caller, user_no: usize) -> UserManagerResult<()> {
        if !caller.is_self_or_admin(user_no) {
            return Err(UserManagerError::Forbidden(
                "only the user or an administrator can delete this account".to_string(),
            ));
        }
        if !self.user_store.soft_delete_user(user_no)? {
            return Err(UserManagerError::NotFound(format!(
                "user {} not found",
                user_no
            )));
        }
        let revoked = self.user_store.delete_all_user_auth_tokens(user_no)?;
        info!("Deleted user {}, revoked {} tokens", user_no, revoked);
        Ok(())
    }

    pub fn set_password(&self, email: &str, password: &str) -> UserManagerResult<()> {
        validate_password(password)?;
        let user = self.user_by_email(email)?;
        let credentials = UserPasswordCredentials::create(user.user_no, password)?;
        self.user_store.set_password_credentials(&credentials)?;
        Ok(())
    }

    pub fn set_role(&self, email: &str, role: UserRole) -> UserManagerResult<()> {
        let user = self.user_by_email(email)?;
        self.user_store.set_user_role(user.user_no, role)?;
        Ok(())
    }

    /// Every account, deleted ones included.
    pub fn list_users(&self) -> UserManagerResult<Vec<UserProfile>> {
        Ok(self.user_store.list_users()?)
    }

    fn user_by_email(&self, email: &str) -> UserManagerResult<UserProfile> {
        let email = email.trim().to_lowercase();
        self.user_store
            .get_user_by_email(&email)?
            .ok_or_else(|| UserManagerError::NotFound(format!("user {} not found", email)))
    }

    // =========================================================================
    // Playlists
    // =========================================================================

    pub fn create_playlist(
        &self,
        caller: &Caller,
        title: &str,
        content: Option<&str>,
    ) -> UserManagerResult<Playlist> {
        let title = require_text("title", title, MAX_PLAYLIST_TITLE_CHARS)?;
        let playlist_no = self
            .user_store
            .create_playlist(caller.user_no, &title, content)?;
        self.get_playlist(playlist_no)
    }

    pub fn get_playlist(&self, playlist_no: usize) -> UserManagerResult<Playlist> {
        self.user_store.get_playlist(playlist_no)?.ok_or_else(|| {
            UserManagerError::NotFound(format!("playlist {} not found", playlist_no))
        })
    }

    pub fn list_playlists(&self) -> UserManagerResult<Vec<Playlist>> {
        Ok(self.user_store.list_playlists()?)
    }

    pub fn list_user_playlists(&self, user_no: usize) -> UserManagerResult<Vec<Playlist>> {
        Ok(self.user_store.list_user_playlists(user_no)?)
    }

    pub fn update_playlist(
        &self,
        caller: &Caller,
        playlist_no: usize,
        title: &str,
        content: Option<&str>,
    ) -> UserManagerResult<Playlist> {
        self.owned_playlist(caller, playlist_no)?;
        let title = require_text("title", title, MAX_PLAYLIST_TITLE_CHARS)?;
        self.user_store
            .update_playlist(playlist_no, &title, content)?;
        self.get_playlist(playlist_no)
    }

    pub fn delete_playlist(&self, caller: &Caller, playlist_no: usize) -> UserManagerResult<()> {
        self.owned_playlist(caller, playlist_no)?;
        self.user_store.delete_playlist(playlist_no)?;
        Ok(())
    }

    /// Returns the playlist if the caller owns it.
    /// A missing playlist is reported before a foreign one.
    fn owned_playlist(&self, caller: &Caller, playlist_no: usize) -> UserManagerResult<Playlist> {
        let playlist = self.get_playlist(playlist_no)?;
        if playlist.user_no != caller.user_no {
            return Err(UserManagerError::Forbidden(
                "only the owner can modify this playlist".to_string(),
            ));
        }
        Ok(playlist)
    }

    // =========================================================================
    // Music lists
    // =========================================================================

    pub fn add_music(
        &self,
        caller: &Caller,
        playlist_no: usize,
        music_no: usize,
    ) -> UserManagerResult<()> {
        self.owned_playlist(caller, playlist_no)?;
        if self.catalog_store.get_track(music_no)?.is_none() {
            return validation(format!("music {} does not exist", music_no));
        }
        if self.user_store.has_music(playlist_no, music_no)? {
            return validation("music is already in the playlist");
        }
        self.user_store.add_music(playlist_no, music_no)?;
        Ok(())
    }

    pub fn remove_music(
        &self,
        caller: &Caller,
        playlist_no: usize,
        music_no: usize,
    ) -> UserManagerResult<()> {
        self.owned_playlist(caller, playlist_no)?;
        if !self.user_store.remove_music(playlist_no, music_no)? {
            return validation("music is not in the playlist");
        }
        Ok(())
    }

    /// Empties a playlist, returns how many tracks were removed.
    pub fn clear_music(&self, caller: &Caller, playlist_no: usize) -> UserManagerResult<usize> {
        self.owned_playlist(caller, playlist_no)?;
        Ok(self.user_store.clear_music(playlist_no)?)
    }

    /// Tracks of a playlist in insertion order. Entries whose track is no
    /// longer in the catalog are left out.
    pub fn playlist_music(&self, playlist_no: usize) -> UserManagerResult<Vec<PlaylistTrack>> {
        self.get_playlist(playlist_no)?;
        let mut tracks = Vec::new();
        for entry in self.user_store.list_music(playlist_no)? {
            match self.catalog_store.get_track(entry.music_no)? {
                Some(track) => tracks.push(PlaylistTrack {
                    playlist_no: entry.playlist_no,
                    added_at: entry.added_at,
                    track,
                }),
                None => debug!(
                    "Playlist {} references missing music {}",
                    playlist_no, entry.music_no
                ),
            }
        }
        Ok(tracks)
    }

    pub fn playlists_with_music(&self, music_no: usize) -> UserManagerResult<Vec<PlaylistRef>> {
        Ok(self.user_store.playlists_with_music(music_no)?)
    }

    pub fn remove_music_from_all_playlists(&self, music_no: usize) -> UserManagerResult<usize> {
        Ok(self.user_store.remove_music_everywhere(music_no)?)
    }

    // =========================================================================
    // Notices
    // =========================================================================

    pub fn create_notice(
        &self,
        caller: &Caller,
        title: &str,
        content: &str,
    ) -> UserManagerResult<Notice> {
        self.require_notice_manager(caller)?;
        let (title, content) = validate_notice(title, content)?;
        let notice_no = self
            .user_store
            .create_notice(caller.user_no, &title, &content)?;
        self.get_notice(notice_no)
    }

    pub fn get_notice(&self, notice_no: usize) -> UserManagerResult<Notice> {
        self.user_store
            .get_notice(notice_no)?
            .ok_or_else(|| UserManagerError::NotFound(format!("notice {} not found", notice_no)))
    }

    pub fn list_notices(&self) -> UserManagerResult<Vec<Notice>> {
        Ok(self.user_store.list_notices()?)
    }

    pub fn update_notice(
        &self,
        caller: &Caller,
        notice_no: usize,
        title: &str,
        content: &str,
    ) -> UserManagerResult<Notice> {
        self.require_notice_manager(caller)?;
        self.get_notice(notice_no)?;
        let (title, content) = validate_notice(title, content)?;
        self.user_store
            .update_notice(notice_no, &title, &content)?;
        self.get_notice(notice_no)
    }

    pub fn delete_notice(&self, caller: &Caller, notice_no: usize) -> UserManagerResult<()> {
        self.require_notice_manager(caller)?;
        if !self.user_store.delete_notice(notice_no)? {
            return Err(UserManagerError::NotFound(format!(
                "notice {} not found",
                notice_no
            )));
        }
        Ok(())
    }

    fn require_notice_manager(&self, caller: &Caller) -> UserManagerResult<()> {
        if !caller.has_permission(Permission::ManageNotices) {
            return Err(UserManagerError::Forbidden(
                "administrator privileges required".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_notice(title: &str, content: &str) -> UserManagerResult<(String, String)> {
    let title = require_text("title", title, MAX_NOTICE_TITLE_CHARS)?;
    if content.trim().is_empty() {
        return validation("content is required");
    }
    Ok((title, content.to_string()))
}
