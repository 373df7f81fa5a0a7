//! Schema of the catalog database.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

/// Local genre vocabulary written into a freshly created catalog.
pub const SEED_GENRES: &[&str] = &[
    "K-Pop",
    "Pop",
    "Rock",
    "Hip-Hop",
    "R&B",
    "Jazz",
    "Electronic",
    "Ballad",
    "Indie",
];

const GENRE_TABLE_V_0: Table = Table {
    name: "genre",
    columns: &[
        sqlite_column!("genre_no", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

const MUSIC_TABLE_V_0: Table = Table {
    name: "music",
    columns: &[
        sqlite_column!("music_no", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("spotify_track_id", &SqlType::Text),
        sqlite_column!("track_name", &SqlType::Text, non_null = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("album_name", &SqlType::Text, non_null = true),
        sqlite_column!("album_image_url", &SqlType::Text),
        sqlite_column!(
            "duration_ms",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "popularity",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("spotify_url", &SqlType::Text, non_null = true),
        sqlite_column!("preview_url", &SqlType::Text),
        sqlite_column!("release_date", &SqlType::Text),
        sqlite_column!("release_year", &SqlType::Integer),
        sqlite_column!(
            "genre_no",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "genre",
                foreign_column: "genre_no",
                on_delete: ForeignKeyOnChange::SetNull,
            })
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_music_popularity", "popularity"),
        ("idx_music_genre", "genre_no"),
        ("idx_music_release_year", "release_year"),
    ],
    unique_constraints: &[&["spotify_url"]],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[GENRE_TABLE_V_0, MUSIC_TABLE_V_0],
    migration: None,
}];
