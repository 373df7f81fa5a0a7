//! Provider API response types.
//!
//! These mirror the JSON returned by the Spotify Web API. Every field the
//! ingestion does not strictly need is optional or defaulted so that partial
//! records still deserialize.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<ProviderImage>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// A raw track record as returned by search and playlist endpoints.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ProviderArtistRef>,
    #[serde(default)]
    pub album: ProviderAlbum,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl ProviderTrack {
    pub fn external_url(&self) -> Option<&str> {
        self.external_urls
            .spotify
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    pub fn first_artist(&self) -> Option<&ProviderArtistRef> {
        self.artists.first()
    }

    pub fn first_album_image(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }
}

/// Full artist record, only the genre tags are used.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// One page of track search results.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<ProviderTrack>,
    /// Total number of matches reported by the provider.
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaylistItem {
    #[serde(default)]
    pub track: Option<ProviderTrack>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaylistTracksResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
