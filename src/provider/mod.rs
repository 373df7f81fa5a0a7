//! External catalog provider.
//!
//! The ingestion pipeline talks to the provider only through the
//! [`CatalogProvider`] trait so that tests can substitute a fake.

mod models;
mod spotify;

pub use models::{
    ExternalUrls, ProviderAlbum, ProviderArtist, ProviderArtistRef, ProviderImage, ProviderTrack,
    TrackPage,
};
pub use spotify::SpotifyClient;

use anyhow::Result;
use async_trait::async_trait;

/// Largest page the provider serves for a single search or playlist request.
pub const PROVIDER_MAX_PAGE_SIZE: usize = 50;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Searches tracks matching `query`, returning one page of results starting
    /// at `offset` together with the total number of matches.
    async fn search_tracks(&self, query: &str, limit: usize, offset: usize) -> Result<TrackPage>;

    /// Fetches a single artist, used for its genre tags.
    async fn fetch_artist(&self, artist_id: &str) -> Result<ProviderArtist>;

    /// Fetches up to `limit` tracks of a provider playlist, in playlist order.
    async fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<ProviderTrack>>;
}
