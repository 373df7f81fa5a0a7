use super::response::{created, ok, ok_message, ok_with_message, ApiJson, ApiPath, ApiResult};
use super::session::Session;
use super::state::{GuardedUserManager, ServerState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct NoticeBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

async fn post_notice(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Json(body), _): ApiJson<NoticeBody>,
) -> ApiResult {
    let notice = user_manager.create_notice(&session.caller(), &body.title, &body.content)?;
    created("notice created", notice)
}

async fn list_notices(State(user_manager): State<GuardedUserManager>) -> ApiResult {
    ok(user_manager.list_notices()?)
}

async fn get_notice(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(notice_no), _): ApiPath<usize>,
) -> ApiResult {
    ok(user_manager.get_notice(notice_no)?)
}

async fn put_notice(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(notice_no), _): ApiPath<usize>,
    WithRejection(Json(body), _): ApiJson<NoticeBody>,
) -> ApiResult {
    let notice =
        user_manager.update_notice(&session.caller(), notice_no, &body.title, &body.content)?;
    ok_with_message("notice updated", notice)
}

async fn delete_notice(
    session: Session,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(notice_no), _): ApiPath<usize>,
) -> ApiResult {
    user_manager.delete_notice(&session.caller(), notice_no)?;
    ok_message("notice deleted")
}

pub fn make_notice_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", post(post_notice).get(list_notices))
        .route(
            "/{notice_no}",
            get(get_notice).put(put_notice).delete(delete_notice),
        )
        .with_state(state)
}
