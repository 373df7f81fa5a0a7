//! Catalog routes: provider search, imports, local listings and track admin.

use super::response::{created, ok, ok_message, ApiError, ApiJson, ApiPath, ApiQuery, ApiResult};
use super::session::Session;
use super::state::{GuardedCatalogStore, GuardedUserManager, OptionalIngestion, ServerState};
use crate::catalog_store::{CategoryFilter, Track};
use crate::ingestion::{IngestedTrack, IngestionPipeline};
use crate::server::metrics;
use crate::user::Permission;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const DEFAULT_SEARCH_LIMIT: usize = 20;
const DEFAULT_BULK_IMPORT_COUNT: usize = 100;
const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 100;
const DEFAULT_CATEGORY_LIMIT: usize = 50;
const DEFAULT_DB_SEARCH_LIMIT: usize = 20;
const TOP50_LIMIT: usize = 50;

#[derive(Deserialize, Debug)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
    page: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    tracks: Vec<IngestedTrack>,
    count: usize,
    total: usize,
}

#[derive(Deserialize, Debug)]
struct BulkImportBody {
    #[serde(default)]
    query: String,
    count: Option<usize>,
}

#[derive(Serialize)]
struct BulkImportResponse {
    query: String,
    count: usize,
    tracks: Vec<IngestedTrack>,
}

#[derive(Serialize)]
struct Top50Response {
    playlist_id: String,
    tracks: Vec<IngestedTrack>,
    count: usize,
}

#[derive(Deserialize, Debug)]
struct ListParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Serialize)]
struct ListResponse {
    musics: Vec<Track>,
    total: usize,
    limit: usize,
    offset: usize,
}

#[derive(Deserialize, Debug)]
struct CategoryParams {
    #[serde(default)]
    category: String,
    #[serde(default)]
    value: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct CategoryResponse {
    category: String,
    value: String,
    musics: Vec<Track>,
    count: usize,
}

#[derive(Deserialize, Debug)]
struct DbSearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct DbSearchResponse {
    query: String,
    musics: Vec<Track>,
    count: usize,
}

fn require_ingestion(ingestion: OptionalIngestion) -> Result<Arc<IngestionPipeline>, ApiError> {
    ingestion.ok_or_else(|| {
        ApiError::Internal("Music provider credentials are not configured".to_string())
    })
}

async fn search_music(
    _session: Session,
    State(ingestion): State<OptionalIngestion>,
    WithRejection(Query(params), _): ApiQuery<SearchParams>,
) -> ApiResult {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query parameter q is required".to_string()));
    }
    let ingestion = require_ingestion(ingestion)?;
    let result = ingestion
        .search_and_ingest(
            query,
            params.page.unwrap_or(1),
            params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        )
        .await?;

    ok(SearchResponse {
        query: query.to_string(),
        count: result.items.len(),
        tracks: result.items,
        total: result.total,
    })
}

async fn bulk_import(
    session: Session,
    State(ingestion): State<OptionalIngestion>,
    WithRejection(Json(body), _): ApiJson<BulkImportBody>,
) -> ApiResult {
    session.require(Permission::ImportMusic)?;
    let query = body.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query is required".to_string()));
    }
    let ingestion = require_ingestion(ingestion)?;
    let tracks = ingestion
        .bulk_import(query, body.count.unwrap_or(DEFAULT_BULK_IMPORT_COUNT))
        .await?;

    info!(
        "User {} imported {} tracks for \"{}\"",
        session.user_no,
        tracks.len(),
        query
    );
    created(
        format!("{} tracks imported", tracks.len()),
        BulkImportResponse {
            query: query.to_string(),
            count: tracks.len(),
            tracks,
        },
    )
}

async fn top50(_session: Session, State(state): State<ServerState>) -> ApiResult {
    let ingestion = require_ingestion(state.ingestion)?;
    let playlist_id = state.config.top50_playlist_id;
    let tracks = ingestion.import_playlist(&playlist_id, TOP50_LIMIT).await?;
    ok(Top50Response {
        playlist_id,
        count: tracks.len(),
        tracks,
    })
}

async fn list_music(
    State(catalog_store): State<GuardedCatalogStore>,
    WithRejection(Query(params), _): ApiQuery<ListParams>,
) -> ApiResult {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let musics = catalog_store.list_tracks(limit, offset)?;
    let total = catalog_store.count_tracks()?;
    ok(ListResponse {
        musics,
        total,
        limit,
        offset,
    })
}

async fn list_genres(State(catalog_store): State<GuardedCatalogStore>) -> ApiResult {
    ok(catalog_store.list_genres()?)
}

async fn music_by_category(
    State(catalog_store): State<GuardedCatalogStore>,
    WithRejection(Query(params), _): ApiQuery<CategoryParams>,
) -> ApiResult {
    let filter =
        CategoryFilter::parse(&params.category, &params.value).map_err(ApiError::BadRequest)?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_CATEGORY_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let musics = catalog_store.list_by_category(&filter, limit)?;
    ok(CategoryResponse {
        category: params.category,
        value: params.value,
        count: musics.len(),
        musics,
    })
}

async fn search_music_in_db(
    State(catalog_store): State<GuardedCatalogStore>,
    WithRejection(Query(params), _): ApiQuery<DbSearchParams>,
) -> ApiResult {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query parameter q is required".to_string()));
    }
    let limit = params
        .limit
        .unwrap_or(DEFAULT_DB_SEARCH_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let musics = catalog_store.search_tracks(query, limit)?;
    ok(DbSearchResponse {
        query: query.to_string(),
        count: musics.len(),
        musics,
    })
}

async fn get_music(
    State(catalog_store): State<GuardedCatalogStore>,
    WithRejection(Path(music_no), _): ApiPath<usize>,
) -> ApiResult {
    match catalog_store.get_track(music_no)? {
        Some(track) => ok(track),
        None => Err(ApiError::NotFound(format!("music {} not found", music_no))),
    }
}

/// Removes a track from the catalog and from every playlist holding it.
async fn delete_music(
    session: Session,
    State(catalog_store): State<GuardedCatalogStore>,
    State(user_manager): State<GuardedUserManager>,
    WithRejection(Path(music_no), _): ApiPath<usize>,
) -> ApiResult {
    session.require(Permission::ManageCatalog)?;
    if !catalog_store.delete_track(music_no)? {
        return Err(ApiError::NotFound(format!("music {} not found", music_no)));
    }
    let removed = user_manager.remove_music_from_all_playlists(music_no)?;
    metrics::set_catalog_size(catalog_store.count_tracks()?);

    info!(
        "User {} deleted music {}, removed from {} playlists",
        session.user_no, music_no, removed
    );
    ok_message(format!("music {} deleted", music_no))
}

pub fn make_music_routes(state: ServerState) -> axum::Router {
    Router::new()
        .route("/", get(list_music))
        .route("/search", get(search_music))
        .route("/search/db", get(search_music_in_db))
        .route("/bulk-import", post(bulk_import))
        .route("/top50", get(top50))
        .route("/genres", get(list_genres))
        .route("/category", get(music_by_category))
        .route("/{music_no}", get(get_music).delete(delete_music))
        .with_state(state)
}
