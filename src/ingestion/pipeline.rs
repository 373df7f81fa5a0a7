use super::IngestionError;
use crate::catalog_store::{CatalogStore, NewTrack, Track};
use crate::genre::classify;
use crate::provider::{CatalogProvider, ProviderTrack, TrackPage, PROVIDER_MAX_PAGE_SIZE};
use crate::server::metrics;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Hard ceiling on the number of tracks a single bulk import collects.
pub const BULK_IMPORT_MAX_TRACKS: usize = 200;
/// Page size used when paging through search results during a bulk import.
pub const BULK_IMPORT_PAGE_SIZE: usize = 50;

/// A stored track together with whether this ingestion created it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IngestedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub is_new: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchIngestResult {
    pub items: Vec<IngestedTrack>,
    /// Total number of matches reported by the provider.
    pub total: usize,
}

pub struct IngestionPipeline {
    provider: Arc<dyn CatalogProvider>,
    catalog_store: Arc<dyn CatalogStore>,
}

impl IngestionPipeline {
    pub fn new(provider: Arc<dyn CatalogProvider>, catalog_store: Arc<dyn CatalogStore>) -> Self {
        Self {
            provider,
            catalog_store,
        }
    }

    /// Runs one provider search page and ingests its results.
    ///
    /// `page` is 1-based and `page_size` is clamped to the provider's maximum.
    pub async fn search_and_ingest(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchIngestResult, IngestionError> {
        let query = validate_query(query)?;
        if page == 0 {
            return Err(IngestionError::InvalidRequest(
                "page must be at least 1".to_string(),
            ));
        }
        let page_size = page_size.clamp(1, PROVIDER_MAX_PAGE_SIZE);
        let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
            IngestionError::InvalidRequest(format!("page {} is out of range", page))
        })?;

        let results = self.search_page(query, page_size, offset).await?;

        let mut items = Vec::with_capacity(results.items.len());
        for raw in &results.items {
            if let Some(ingested) = self.save_if_absent(raw).await {
                items.push(ingested);
            }
        }

        debug!(
            "Search \"{}\" page {} ingested {} of {} results",
            query,
            page,
            items.len(),
            results.items.len()
        );
        Ok(SearchIngestResult {
            items,
            total: results.total,
        })
    }

    /// Pages through the provider search results until `target_count` tracks
    /// are collected or the provider runs out of results.
    ///
    /// Any provider failure fails the whole import. Tracks inserted by earlier
    /// pages stay in the catalog.
    pub async fn bulk_import(
        &self,
        query: &str,
        target_count: usize,
    ) -> Result<Vec<IngestedTrack>, IngestionError> {
        let query = validate_query(query)?;
        let target_count = target_count.min(BULK_IMPORT_MAX_TRACKS);

        let mut items = Vec::with_capacity(target_count);
        let mut offset = 0;
        while items.len() < target_count {
            let results = self
                .search_page(query, BULK_IMPORT_PAGE_SIZE, offset)
                .await?;
            if results.items.is_empty() {
                debug!("Provider exhausted for \"{}\" at offset {}", query, offset);
                break;
            }

            for raw in &results.items {
                if items.len() >= target_count {
                    break;
                }
                if let Some(ingested) = self.save_if_absent(raw).await {
                    items.push(ingested);
                }
            }
            offset += BULK_IMPORT_PAGE_SIZE;
        }

        info!(
            "Bulk import \"{}\" collected {} tracks ({} new)",
            query,
            items.len(),
            items.iter().filter(|t| t.is_new).count()
        );
        Ok(items)
    }

    /// Ingests up to `limit` tracks of a provider playlist, in playlist order.
    pub async fn import_playlist(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<IngestedTrack>, IngestionError> {
        let limit = limit.clamp(1, PROVIDER_MAX_PAGE_SIZE);
        let tracks = self
            .provider
            .fetch_playlist_tracks(playlist_id, limit)
            .await
            .map_err(|err| {
                metrics::record_provider_error("playlist");
                IngestionError::Provider(err)
            })?;

        let mut items = Vec::with_capacity(tracks.len());
        for raw in tracks.iter().take(limit) {
            if let Some(ingested) = self.save_if_absent(raw).await {
                items.push(ingested);
            }
        }
        Ok(items)
    }

    async fn search_page(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<TrackPage, IngestionError> {
        self.provider
            .search_tracks(query, limit, offset)
            .await
            .map_err(|err| {
                warn!("Provider search \"{}\" at offset {} failed: {:#}", query, offset, err);
                metrics::record_provider_error("search");
                IngestionError::Provider(err)
            })
    }

    /// Returns the stored track for a provider record, inserting it first when
    /// its external url has not been seen before.
    ///
    /// Returns None when the record has no external url or when the catalog
    /// lookup or insert fails. Existing rows are returned untouched.
    async fn save_if_absent(&self, raw: &ProviderTrack) -> Option<IngestedTrack> {
        let Some(url) = raw.external_url() else {
            debug!("Skipping provider track \"{}\" without external url", raw.name);
            metrics::record_ingested_track("skipped");
            return None;
        };

        match self.catalog_store.find_by_external_url(url) {
            Ok(Some(track)) => {
                metrics::record_ingested_track("existing");
                return Some(IngestedTrack {
                    track,
                    is_new: false,
                });
            }
            Ok(None) => {}
            Err(err) => {
                warn!("Catalog lookup for {} failed: {:#}", url, err);
                metrics::record_ingested_track("failed");
                return None;
            }
        }

        let genre_no = self.classify_first_artist(raw).await;
        let new_track = NewTrack {
            spotify_track_id: raw.id.clone(),
            track_name: raw.name.clone(),
            artist_name: raw
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album_name: raw.album.name.clone(),
            album_image_url: raw.first_album_image().map(str::to_string),
            duration_ms: raw.duration_ms,
            popularity: raw.popularity,
            spotify_url: url.to_string(),
            preview_url: raw.preview_url.clone(),
            release_date: raw.album.release_date.clone(),
            genre_no,
        };

        let stored = self
            .catalog_store
            .insert_track(&new_track)
            .and_then(|music_no| self.catalog_store.get_track(music_no));
        match stored {
            Ok(Some(track)) => {
                metrics::record_ingested_track("saved");
                Some(IngestedTrack {
                    track,
                    is_new: true,
                })
            }
            Ok(None) => {
                warn!("Track {} vanished right after being inserted", url);
                metrics::record_ingested_track("failed");
                None
            }
            Err(err) => {
                warn!("Failed to save track {}: {:#}", url, err);
                metrics::record_ingested_track("failed");
                None
            }
        }
    }

    /// Genre of the record's first artist, looked up best-effort.
    async fn classify_first_artist(&self, raw: &ProviderTrack) -> Option<usize> {
        let artist_id = raw.first_artist().and_then(|artist| artist.id.as_deref())?;
        let tags = match self.provider.fetch_artist(artist_id).await {
            Ok(artist) => artist.genres,
            Err(err) => {
                debug!("Could not fetch artist {}: {:#}", artist_id, err);
                metrics::record_provider_error("artist");
                Vec::new()
            }
        };
        classify(&tags, self.catalog_store.as_ref())
    }
}

fn validate_query(query: &str) -> Result<&str, IngestionError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(IngestionError::InvalidRequest(
            "query must not be empty".to_string(),
        ));
    }
    Ok(query)
}
