use anyhow::{Context, Result};
use std::{sync::Arc, time::Instant};

use tracing::{debug, info};

use crate::catalog_store::CatalogStore;
use crate::ingestion::IngestionPipeline;
use crate::provider::CatalogProvider;
use crate::user::{FullUserStore, UserManager};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    WithRejection,
};

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use super::metrics::{self, metrics_handler};
use super::response::{created, ok, ok_message, ApiError, ApiJson, ApiResult};
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::{
    log_requests, make_music_routes, make_notice_routes, make_playlist_routes, make_user_routes,
    state::*, ServerConfig,
};
use crate::user::auth::AuthTokenValue;

const SERVICE_NAME: &str = "Listify Spotify API";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    version: &'static str,
    uptime_sec: u64,
    endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    database: &'static str,
    spotify: bool,
    version: &'static str,
}

#[derive(Deserialize, Debug)]
struct RegisterBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    nickname: String,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    access_token: String,
    token_type: &'static str,
    user_no: usize,
    nickname: String,
}

#[derive(Serialize)]
struct VerifyResponse {
    user_no: usize,
    role_no: i32,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServiceInfo {
        message: SERVICE_NAME,
        version: VERSION,
        uptime_sec: state.start_time.elapsed().as_secs(),
        endpoints: vec![
            "/health",
            "/auth",
            "/music",
            "/playlist",
            "/notice",
            "/users",
        ],
    })
}

async fn health(State(state): State<ServerState>) -> Response {
    let database_ok = match state.catalog_store.count_tracks() {
        Ok(count) => {
            metrics::set_catalog_size(count);
            true
        }
        Err(err) => {
            debug!("Health check database failure: {:#}", err);
            false
        }
    };
    let status = HealthStatus {
        status: if database_ok { "healthy" } else { "unhealthy" },
        database: if database_ok {
            "connected"
        } else {
            "disconnected"
        },
        spotify: state.ingestion.is_some(),
        version: VERSION,
    };
    let code = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (code, Json(status)).into_response()
}

async fn register(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Json(body), _): ApiJson<RegisterBody>,
) -> ApiResult {
    debug!("register() called for {:?}", body.email);
    let profile = user_manager.register(&body.email, &body.password, &body.nickname)?;
    created("user registered", profile)
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Json(body), _): ApiJson<LoginBody>,
) -> ApiResult {
    debug!("login() called for {:?}", body.email);
    let start = Instant::now();
    let (user, token) = match user_manager.login(&body.email, &body.password) {
        Ok(result) => result,
        Err(err) => {
            metrics::record_login_attempt("failure", start.elapsed());
            return Err(err.into());
        }
    };
    metrics::record_login_attempt("success", start.elapsed());

    let cookie = Cookie::build((COOKIE_SESSION_TOKEN_KEY, token.value.0.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    let mut response = created(
        "login successful",
        LoginSuccessResponse {
            access_token: token.value.0,
            token_type: "bearer",
            user_no: user.user_no,
            nickname: user.nickname,
        },
    )?;
    set_cookie(&mut response, &cookie)?;
    Ok(response)
}

async fn logout(State(user_manager): State<GuardedUserManager>, session: Session) -> ApiResult {
    user_manager.logout(&AuthTokenValue(session.token))?;

    let cookie = Cookie::build((COOKIE_SESSION_TOKEN_KEY, ""))
        .path("/")
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1))
        .same_site(SameSite::Lax)
        .build();
    let mut response = ok_message("logged out")?;
    set_cookie(&mut response, &cookie)?;
    Ok(response)
}

async fn verify(session: Session) -> ApiResult {
    ok(VerifyResponse {
        user_no: session.user_no,
        role_no: session.role.role_no(),
    })
}

fn set_cookie(response: &mut Response, cookie: &Cookie<'_>) -> Result<(), ApiError> {
    let value = cookie
        .to_string()
        .parse()
        .map_err(|_| ApiError::Internal("Could not build session cookie".to_string()))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}

pub fn make_app(
    config: ServerConfig,
    catalog_store: Arc<dyn CatalogStore>,
    user_store: Arc<dyn FullUserStore>,
    provider: Option<Arc<dyn CatalogProvider>>,
) -> Result<Router> {
    let ingestion = provider
        .map(|provider| Arc::new(IngestionPipeline::new(provider, catalog_store.clone())));
    let user_manager = Arc::new(UserManager::new(catalog_store.clone(), user_store));

    let state = ServerState {
        config,
        start_time: Instant::now(),
        catalog_store,
        user_manager,
        ingestion,
    };

    let auth_routes: Router = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/verify", get(verify))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state.clone());

    let app: Router = home_router
        .nest("/auth", auth_routes)
        .nest("/music", make_music_routes(state.clone()))
        .nest("/playlist", make_playlist_routes(state.clone()))
        .nest("/notice", make_notice_routes(state.clone()))
        .nest("/users", make_user_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(
    config: ServerConfig,
    catalog_store: Arc<dyn CatalogStore>,
    user_store: Arc<dyn FullUserStore>,
    provider: Option<Arc<dyn CatalogProvider>>,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, catalog_store, user_store, provider)?;

    let metrics_app = Router::new().route("/metrics", get(metrics_handler));
    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Could not bind metrics port {}", metrics_port))?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Could not bind port {}", port))?;

    info!("Serving metrics on port {}", metrics_port);
    tokio::try_join!(
        async { axum::serve(metrics_listener, metrics_app).await },
        async { axum::serve(listener, app).await },
    )?;
    Ok(())
}
