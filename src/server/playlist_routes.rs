//! Playlist and music list routes.

use super::response::{
    created, ok, ok_message, ok_with_message, ApiError, ApiJson, ApiPath, ApiResult,
};
use super::session::Session;
use super::state::{GuardedUserManager, ServerState};
use crate::user::Permission;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct PlaylistBody {
    #[serde(default)]
    title: String,
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AddMusicBody {
    music_no: Option<usize>,
}

async fn post_playlist(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Json(body), _): ApiJson<PlaylistBody>,
) -> ApiResult {
    session.require(Permission::OwnPlaylists)?;
    let playlist =
        user_manager.create_playlist(&session.caller(), &body.title, body.content.as_deref())?;
    created("playlist created", playlist)
}

async fn list_playlists(State(user_manager): State<GuardedUserManager>) -> ApiResult {
    ok(user_manager.list_playlists()?)
}

async fn get_playlist(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.get_playlist(playlist_no)?)
}

async fn put_playlist(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
    WithRejection(Json(body), _): ApiJson<PlaylistBody>,
) -> ApiResult {
    let playlist = user_manager.update_playlist(
        &session.caller(),
        playlist_no,
        &body.title,
        body.content.as_deref(),
    )?;
    ok_with_message("playlist updated", playlist)
}

async fn delete_playlist(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
) -> ApiResult {
    user_manager.delete_playlist(&session.caller(), playlist_no)?;
    ok_message("playlist deleted")
}

async fn get_user_playlists(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(user_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.list_user_playlists(user_no)?)
}

async fn add_music(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
    WithRejection(Json(body), _): ApiJson<AddMusicBody>,
) -> ApiResult {
    let Some(music_no) = body.music_no else {
        return Err(ApiError::BadRequest("music_no is required".to_string()));
    };
    user_manager.add_music(&session.caller(), playlist_no, music_no)?;
    created(
        "music added to playlist",
        serde_json::json!({ "playlist_no": playlist_no, "music_no": music_no }),
    )
}

async fn get_playlist_music(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.playlist_music(playlist_no)?)
}

async fn remove_music(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path((playlist_no, music_no)), _): ApiPath<(usize, usize)>,
) -> ApiResult {
    user_manager.remove_music(&session.caller(), playlist_no, music_no)?;
    ok_message("music removed from playlist")
}

async fn clear_music(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(playlist_no), _): ApiPath<usize>,
) -> ApiResult {
    let removed = user_manager.clear_music(&session.caller(), playlist_no)?;
    ok_with_message(
        format!("{} tracks removed", removed),
        serde_json::json!({ "removed": removed }),
    )
}

async fn playlists_by_music(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(music_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.playlists_with_music(music_no)?)
}

pub fn make_playlist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", post(post_playlist).get(list_playlists))
        .route(
            "/{playlist_no}",
            get(get_playlist).put(put_playlist).delete(delete_playlist),
        )
        .route("/user/{user_no}", get(get_user_playlists))
        .route(
            "/{playlist_no}/music",
            post(add_music).get(get_playlist_music).delete(clear_music),
        )
        .route("/{playlist_no}/music/{music_no}", delete(remove_music))
        .route("/by-music/{music_no}", get(playlists_by_music))
        .with_state(state)
}
