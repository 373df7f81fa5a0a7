pub mod auth;
pub mod permissions;
mod sqlite_user_store;
mod user_manager;
pub mod user_models;
mod user_store;

pub use auth::{AuthToken, AuthTokenValue, ListifyHasher, UserPasswordCredentials};
pub use permissions::{Permission, UserRole};
pub use sqlite_user_store::SqliteUserStore;
pub use user_manager::{Caller, UserManager, UserManagerError, UserManagerResult};
pub use user_models::{MusicListEntry, Notice, Playlist, PlaylistRef, PlaylistTrack, UserProfile};
pub use user_store::{
    FullUserStore, NoticeStore, PlaylistStore, UserAuthCredentialsStore, UserAuthTokenStore,
    UserStore,
};
