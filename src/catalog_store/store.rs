//! SQLite-backed catalog store.

use super::models::{CategoryFilter, Genre, NewTrack, Track};
use super::schema::{CATALOG_VERSIONED_SCHEMAS, SEED_GENRES};
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::open_versioned;
use anyhow::{Context, Result};
use rusqlite::{params, types::ToSql, Connection, OpenFlags, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const TRACK_COLUMNS: &str = "m.music_no, m.spotify_track_id, m.track_name, m.artist_name, \
     m.album_name, m.album_image_url, m.duration_ms, m.popularity, m.spotify_url, \
     m.preview_url, m.release_date, m.release_year, m.genre_no, m.created_at";

fn track_from_row(row: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        music_no: row.get(0)?,
        spotify_track_id: row.get(1)?,
        track_name: row.get(2)?,
        artist_name: row.get(3)?,
        album_name: row.get(4)?,
        album_image_url: row.get(5)?,
        duration_ms: row.get(6)?,
        popularity: row.get(7)?,
        spotify_url: row.get(8)?,
        preview_url: row.get(9)?,
        release_date: row.get(10)?,
        release_year: row.get(11)?,
        genre_no: row.get(12)?,
        created_at: row.get(13)?,
    })
}

/// Builds the join and where clause selecting the tracks of a category.
fn category_clause(filter: &CategoryFilter) -> (&'static str, Box<dyn ToSql>) {
    match filter {
        CategoryFilter::Artist(name) => (
            "WHERE m.artist_name LIKE ?1",
            Box::new(format!("%{}%", name)),
        ),
        CategoryFilter::GenreName(name) => (
            "JOIN genre g ON g.genre_no = m.genre_no WHERE g.name = ?1",
            Box::new(name.clone()),
        ),
        CategoryFilter::GenreNo(genre_no) => ("WHERE m.genre_no = ?1", Box::new(*genre_no)),
        CategoryFilter::Year(year) => ("WHERE m.release_year = ?1", Box::new(*year)),
    }
}

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Opens the catalog database at `db_path`, creating and seeding it if it
    /// does not exist yet.
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = if db_path.exists() {
            let conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("Failed to open catalog db {:?}", db_path))?;
            open_versioned(&conn, CATALOG_VERSIONED_SCHEMAS)?;
            conn
        } else {
            info!("Creating catalog db at {:?}", db_path);
            let conn = Connection::open(db_path)?;
            Self::create_schema(&conn)?;
            conn
        };

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        CATALOG_VERSIONED_SCHEMAS
            .last()
            .context("No catalog schema defined")?
            .create(conn)?;
        for name in SEED_GENRES {
            conn.execute("INSERT INTO genre (name) VALUES (?1)", params![name])?;
        }
        Ok(())
    }

    fn query_tracks(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(sql)?;
        let tracks = stmt
            .query_map(params, track_from_row)?
            .collect::<rusqlite::Result<Vec<Track>>>()?;
        Ok(tracks)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn find_by_external_url(&self, url: &str) -> Result<Option<Track>> {
        let sql = format!("SELECT {} FROM music m WHERE m.spotify_url = ?1", TRACK_COLUMNS);
        Ok(self.query_tracks(&sql, &[&url])?.into_iter().next())
    }

    fn insert_track(&self, track: &NewTrack) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO music (spotify_track_id, track_name, artist_name, album_name, \
             album_image_url, duration_ms, popularity, spotify_url, preview_url, \
             release_date, release_year, genre_no) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                track.spotify_track_id,
                track.track_name,
                track.artist_name,
                track.album_name,
                track.album_image_url,
                track.duration_ms,
                track.popularity,
                track.spotify_url,
                track.preview_url,
                track.release_date,
                track.release_year(),
                track.genre_no,
            ],
        )
        .with_context(|| format!("Failed to insert track {}", track.spotify_url))?;
        let music_no = conn.last_insert_rowid() as usize;
        debug!("Inserted track {} as {}", track.spotify_url, music_no);
        Ok(music_no)
    }

    fn find_genre_id_by_name(&self, name: &str) -> Result<Option<usize>> {
        let conn = self.conn.lock().unwrap();
        match conn.query_row(
            "SELECT genre_no FROM genre WHERE name = ?1",
            params![name],
            |row| row.get(0),
        ) {
            Ok(genre_no) => Ok(Some(genre_no)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self, filter: Option<&CategoryFilter>) -> Result<Vec<Track>> {
        match filter {
            None => self.query_tracks(
                &format!(
                    "SELECT {} FROM music m ORDER BY m.popularity DESC, m.music_no ASC",
                    TRACK_COLUMNS
                ),
                &[],
            ),
            Some(filter) => {
                let (clause, value) = category_clause(filter);
                self.query_tracks(
                    &format!(
                        "SELECT {} FROM music m {} ORDER BY m.popularity DESC, m.music_no ASC",
                        TRACK_COLUMNS, clause
                    ),
                    &[value.as_ref()],
                )
            }
        }
    }

    fn list_by_category(&self, filter: &CategoryFilter, limit: usize) -> Result<Vec<Track>> {
        let (clause, value) = category_clause(filter);
        self.query_tracks(
            &format!(
                "SELECT {} FROM music m {} ORDER BY m.popularity DESC, m.music_no ASC LIMIT ?2",
                TRACK_COLUMNS, clause
            ),
            &[value.as_ref(), &limit],
        )
    }

    fn list_tracks(&self, limit: usize, offset: usize) -> Result<Vec<Track>> {
        self.query_tracks(
            &format!(
                "SELECT {} FROM music m \
                 ORDER BY m.created_at DESC, m.popularity DESC, m.music_no DESC \
                 LIMIT ?1 OFFSET ?2",
                TRACK_COLUMNS
            ),
            &[&limit, &offset],
        )
    }

    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let pattern = format!("%{}%", query);
        self.query_tracks(
            &format!(
                "SELECT {} FROM music m \
                 WHERE m.track_name LIKE ?1 OR m.artist_name LIKE ?1 OR m.album_name LIKE ?1 \
                 ORDER BY m.popularity DESC, m.music_no ASC LIMIT ?2",
                TRACK_COLUMNS
            ),
            &[&pattern, &limit],
        )
    }

    fn list_genres(&self) -> Result<Vec<Genre>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT genre_no, name FROM genre ORDER BY genre_no")?;
        let genres = stmt
            .query_map([], |row| {
                Ok(Genre {
                    genre_no: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Genre>>>()?;
        Ok(genres)
    }

    fn get_track(&self, music_no: usize) -> Result<Option<Track>> {
        let sql = format!("SELECT {} FROM music m WHERE m.music_no = ?1", TRACK_COLUMNS);
        Ok(self.query_tracks(&sql, &[&music_no])?.into_iter().next())
    }

    fn delete_track(&self, music_no: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM music WHERE music_no = ?1", params![music_no])?;
        Ok(deleted > 0)
    }

    fn count_tracks(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: usize = conn.query_row("SELECT COUNT(*) FROM music", [], |row| row.get(0))?;
        Ok(count)
    }
}
