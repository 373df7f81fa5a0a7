//! CatalogStore trait definition.

use super::models::{CategoryFilter, Genre, NewTrack, Track};
use anyhow::Result;

/// Storage of ingested tracks and of the local genre vocabulary.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Returns the track stored under the given external url.
    /// Returns Ok(None) if no such track exists.
    /// Returns Err if there is a database error.
    fn find_by_external_url(&self, url: &str) -> Result<Option<Track>>;

    /// Inserts a new track and returns its music number.
    /// Returns Err if the insert is rejected, including when a track with the
    /// same external url already exists.
    fn insert_track(&self, track: &NewTrack) -> Result<usize>;

    /// Returns the genre number for a canonical genre name.
    /// Returns Ok(None) if the genre is not part of the vocabulary.
    fn find_genre_id_by_name(&self, name: &str) -> Result<Option<usize>>;

    // =========================================================================
    // Listings
    // =========================================================================

    /// Returns every stored track matching the filter, most popular first.
    /// This is a full scan.
    fn find_all(&self, filter: Option<&CategoryFilter>) -> Result<Vec<Track>>;

    /// Returns every track classified under the genre with the given name,
    /// most popular first.
    fn find_by_genre_name(&self, name: &str) -> Result<Vec<Track>> {
        self.find_all(Some(&CategoryFilter::GenreName(name.to_string())))
    }

    /// Like `find_all` but bounded to `limit` rows.
    fn list_by_category(&self, filter: &CategoryFilter, limit: usize) -> Result<Vec<Track>>;

    /// Returns a page of tracks, newest first.
    fn list_tracks(&self, limit: usize, offset: usize) -> Result<Vec<Track>>;

    /// Substring search on track, artist and album names, most popular first.
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Track>>;

    fn list_genres(&self) -> Result<Vec<Genre>>;

    // =========================================================================
    // Single track access
    // =========================================================================

    /// Returns Ok(None) if the track does not exist.
    fn get_track(&self, music_no: usize) -> Result<Option<Track>>;

    /// Deletes a track, returns false if it did not exist.
    fn delete_track(&self, music_no: usize) -> Result<bool>;

    fn count_tracks(&self) -> Result<usize>;
}
