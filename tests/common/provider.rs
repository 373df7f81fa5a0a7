//! Deterministic stand-in for the music provider

use super::constants::*;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use listify_server::provider::{
    CatalogProvider, ExternalUrls, ProviderAlbum, ProviderArtist, ProviderArtistRef,
    ProviderTrack, TrackPage,
};

/// Every query matches `PROVIDER_SEARCH_TOTAL` tracks by one K-Pop artist.
/// Track urls derive from the query and position, so repeated searches
/// return the same records.
pub struct FakeProvider;

fn fake_track(prefix: &str, i: usize) -> ProviderTrack {
    ProviderTrack {
        id: Some(format!("{}-{}", prefix, i)),
        name: format!("{} song {}", prefix, i),
        artists: vec![ProviderArtistRef {
            id: Some("fake-artist".to_string()),
            name: "Fake Artist".to_string(),
        }],
        album: ProviderAlbum {
            name: format!("{} album", prefix),
            images: vec![],
            release_date: Some("2023-05-01".to_string()),
        },
        duration_ms: 180_000,
        popularity: 50,
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}-{}", prefix, i)),
        },
        preview_url: None,
    }
}

#[async_trait]
impl CatalogProvider for FakeProvider {
    async fn search_tracks(&self, query: &str, limit: usize, offset: usize) -> Result<TrackPage> {
        if query == PROVIDER_FAILING_QUERY {
            return Err(anyhow!("provider unavailable"));
        }
        let end = (offset + limit).min(PROVIDER_SEARCH_TOTAL);
        Ok(TrackPage {
            items: (offset..end).map(|i| fake_track(query, i)).collect(),
            total: PROVIDER_SEARCH_TOTAL,
        })
    }

    async fn fetch_artist(&self, artist_id: &str) -> Result<ProviderArtist> {
        Ok(ProviderArtist {
            id: Some(artist_id.to_string()),
            name: "Fake Artist".to_string(),
            genres: vec!["k-pop".to_string(), "korean pop".to_string()],
        })
    }

    async fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<ProviderTrack>> {
        if playlist_id != TOP50_PLAYLIST_ID {
            return Err(anyhow!("unknown playlist {}", playlist_id));
        }
        Ok((0..PROVIDER_PLAYLIST_SIZE.min(limit))
            .map(|i| fake_track("chart", i))
            .collect())
    }
}
