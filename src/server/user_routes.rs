use super::response::{ok, ok_message, ok_with_message, ApiJson, ApiPath, ApiResult};
use super::session::Session;
use super::state::{GuardedUserManager, ServerState};
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize, Debug)]
struct ProfileBody {
    #[serde(default)]
    nickname: String,
}

async fn get_profile(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(user_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.get_profile(user_no)?)
}

async fn put_profile(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(user_no), _): ApiPath<usize>,
    WithRejection(Json(body), _): ApiJson<ProfileBody>,
) -> ApiResult {
    let profile = user_manager.update_nickname(&session.caller(), user_no, &body.nickname)?;
    ok_with_message("profile updated", profile)
}

async fn delete_user(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(user_no), _): ApiPath<usize>,
) -> ApiResult {
    user_manager.delete_account(&session.caller(), user_no)?;
    info!("User {} deleted account {}", session.user_no, user_no);
    ok_message("account deleted")
}

pub fn make_user_routes(state: ServerState) -> Router {
    Router::new()
        .route("/{user_no}/profile", get(get_profile).put(put_profile))
        .route("/{user_no}", delete(delete_user))
        .with_state(state)
}
