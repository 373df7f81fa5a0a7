//! Catalog rows as stored in and served from the `music` and `genre` tables.

use serde::{Deserialize, Serialize};

/// A stored track. Created once on first sighting of its external url and
/// never updated by ingestion afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub music_no: usize,
    pub spotify_track_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub album_image_url: Option<String>,
    pub duration_ms: u64,
    pub popularity: u32,
    pub spotify_url: String,
    pub preview_url: Option<String>,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    pub genre_no: Option<usize>,
    pub created_at: i64,
}

/// Fields of a track that is about to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTrack {
    pub spotify_track_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub album_image_url: Option<String>,
    pub duration_ms: u64,
    pub popularity: u32,
    pub spotify_url: String,
    pub preview_url: Option<String>,
    pub release_date: Option<String>,
    pub genre_no: Option<usize>,
}

impl NewTrack {
    /// Year parsed from the leading four digits of the release date.
    /// Provider dates come as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(0..4))
            .and_then(|year| year.parse::<i32>().ok())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_no: usize,
    pub name: String,
}

/// Restricts a catalog listing to one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Substring match on the artist name.
    Artist(String),
    /// Genre by its local canonical name, e.g. "K-Pop".
    GenreName(String),
    GenreNo(usize),
    Year(i32),
}

impl CategoryFilter {
    /// Builds a filter from the `category` / `value` pair of a request.
    /// Genre values are taken as a genre number when numeric, as a name otherwise.
    pub fn parse(category: &str, value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("value must not be empty".to_string());
        }
        match category {
            "artist" => Ok(CategoryFilter::Artist(value.to_string())),
            "genre" => Ok(match value.parse::<usize>() {
                Ok(genre_no) => CategoryFilter::GenreNo(genre_no),
                Err(_) => CategoryFilter::GenreName(value.to_string()),
            }),
            "year" => value
                .parse::<i32>()
                .map(CategoryFilter::Year)
                .map_err(|_| format!("Invalid year: {}", value)),
            other => Err(format!(
                "Unknown category '{}', expected one of artist, genre, year",
                other
            )),
        }
    }
}
