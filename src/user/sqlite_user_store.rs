use crate::sqlite_column;
use crate::sqlite_persistence::{
    open_versioned, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    DEFAULT_TIMESTAMP,
};
use crate::user::*;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::{
    path::Path,
    str::FromStr,
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};
use tracing::info;

const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "user",
    foreign_column: "user_no",
    on_delete: ForeignKeyOnChange::Cascade,
};

/// V 0
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!("user_no", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("email", &SqlType::Text, non_null = true),
        sqlite_column!("nickname", &SqlType::Text, non_null = true),
        sqlite_column!("profile_url", &SqlType::Text),
        sqlite_column!(
            "role_no",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "is_deleted",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["email"]],
    indices: &[],
};
const USER_PASSWORD_CREDENTIALS_V_0: Table = Table {
    name: "user_password_credentials",
    columns: &[
        sqlite_column!(
            "user_no",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("salt", &SqlType::Text, non_null = true),
        sqlite_column!("hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_tried", &SqlType::Integer),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    unique_constraints: &[&["user_no"]],
    indices: &[],
};
const AUTH_TOKEN_TABLE_V_0: Table = Table {
    name: "auth_token",
    columns: &[
        sqlite_column!(
            "user_no",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("value", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    unique_constraints: &[&["value"]],
    indices: &[("idx_auth_token_user_no", "user_no")],
};
const PLAYLIST_TABLE_V_0: Table = Table {
    name: "playlist",
    columns: &[
        sqlite_column!("playlist_no", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "user_no",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("content", &SqlType::Text),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_playlist_user_no", "user_no")],
};
/// Tracks live in the catalog database, so `music_no` carries no foreign key.
const MUSIC_LIST_TABLE_V_0: Table = Table {
    name: "music_list",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "playlist_no",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "playlist",
                foreign_column: "playlist_no",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("music_no", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["playlist_no", "music_no"]],
    indices: &[("idx_music_list_music_no", "music_no")],
};
const NOTICE_TABLE_V_0: Table = Table {
    name: "notice",
    columns: &[
        sqlite_column!("notice_no", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "user_no",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("content", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[],
};

pub const USER_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        USER_TABLE_V_0,
        USER_PASSWORD_CREDENTIALS_V_0,
        AUTH_TOKEN_TABLE_V_0,
        PLAYLIST_TABLE_V_0,
        MUSIC_LIST_TABLE_V_0,
        NOTICE_TABLE_V_0,
    ],
    migration: None,
}];

const USER_COLUMNS: &str =
    "user_no, role_no, email, nickname, profile_url, is_deleted, created_at, updated_at";

const PLAYLIST_SELECT: &str = "SELECT p.playlist_no, p.user_no, p.title, p.content, \
     u.nickname, (SELECT COUNT(*) FROM music_list ml WHERE ml.playlist_no = p.playlist_no), \
     p.created_at, p.updated_at \
     FROM playlist p LEFT JOIN user u ON u.user_no = p.user_no";

const NOTICE_SELECT: &str = "SELECT n.notice_no, n.user_no, n.title, n.content, u.nickname, \
     n.created_at, n.updated_at \
     FROM notice n LEFT JOIN user u ON u.user_no = n.user_no";

fn user_from_row(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        user_no: row.get(0)?,
        role_no: row.get(1)?,
        email: row.get(2)?,
        nickname: row.get(3)?,
        profile_url: row.get(4)?,
        is_deleted: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn playlist_from_row(row: &Row) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        playlist_no: row.get(0)?,
        user_no: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        nickname: row.get(4)?,
        music_count: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn notice_from_row(row: &Row) -> rusqlite::Result<Notice> {
    Ok(Notice {
        notice_no: row.get(0)?,
        user_no: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        nickname: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn system_time_from_column_result(value: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(value as u64)
}

fn system_time_to_column(time: SystemTime) -> i64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn now_secs() -> i64 {
    system_time_to_column(SystemTime::now())
}

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = if db_path.exists() {
            let conn = Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("Failed to open user db {:?}", db_path))?;
            open_versioned(&conn, USER_VERSIONED_SCHEMAS)?;
            conn
        } else {
            info!("Creating user db at {:?}", db_path);
            let conn = Connection::open(db_path)?;
            USER_VERSIONED_SCHEMAS
                .last()
                .context("No user schema defined")?
                .create(&conn)?;
            conn
        };

        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn query_user(
        &self,
        where_clause: &str,
        param: &dyn rusqlite::ToSql,
    ) -> Result<Option<UserProfile>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                &format!("SELECT {} FROM user {}", USER_COLUMNS, where_clause),
                [param],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn query_playlists(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Playlist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(sql)?;
        let playlists = stmt
            .query_map(params, playlist_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(playlists)
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, email: &str, nickname: &str, role: UserRole) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO user (email, nickname, role_no) VALUES (?1, ?2, ?3)",
            params![email, nickname, role.role_no()],
        )
        .with_context(|| format!("Failed to create user {}", email))?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_user(&self, user_no: usize) -> Result<Option<UserProfile>> {
        self.query_user("WHERE user_no = ?1 AND is_deleted = 0", &user_no)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        self.query_user("WHERE email = ?1 AND is_deleted = 0", &email)
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM user WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_users(&self) -> Result<Vec<UserProfile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM user ORDER BY user_no",
            USER_COLUMNS
        ))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn update_nickname(&self, user_no: usize, nickname: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE user SET nickname = ?1, updated_at = ?2 WHERE user_no = ?3 AND is_deleted = 0",
            params![nickname, now_secs(), user_no],
        )?;
        Ok(updated > 0)
    }

    fn set_user_role(&self, user_no: usize, role: UserRole) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE user SET role_no = ?1, updated_at = ?2 WHERE user_no = ?3 AND is_deleted = 0",
            params![role.role_no(), now_secs(), user_no],
        )?;
        Ok(updated > 0)
    }

    fn soft_delete_user(&self, user_no: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE user SET is_deleted = 1, updated_at = ?1 WHERE user_no = ?2 AND is_deleted = 0",
            params![now_secs(), user_no],
        )?;
        Ok(updated > 0)
    }
}

impl UserAuthCredentialsStore for SqliteUserStore {
    fn get_password_credentials(&self, user_no: usize) -> Result<Option<UserPasswordCredentials>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT salt, hash, hasher, created, last_tried, last_used \
                 FROM user_password_credentials WHERE user_no = ?1",
                params![user_no],
                |row| {
                    Ok((
                        row.get::<usize, String>(0)?,
                        row.get::<usize, String>(1)?,
                        row.get::<usize, String>(2)?,
                        row.get::<usize, i64>(3)?,
                        row.get::<usize, Option<i64>>(4)?,
                        row.get::<usize, Option<i64>>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((salt, hash, hasher, created, last_tried, last_used)) = row else {
            return Ok(None);
        };
        Ok(Some(UserPasswordCredentials {
            user_no,
            salt,
            hash,
            hasher: ListifyHasher::from_str(&hasher)?,
            created: system_time_from_column_result(created),
            last_tried: last_tried.map(system_time_from_column_result),
            last_used: last_used.map(system_time_from_column_result),
        }))
    }

    fn set_password_credentials(&self, credentials: &UserPasswordCredentials) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO user_password_credentials (user_no, salt, hash, hasher, created) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(user_no) DO UPDATE SET salt = excluded.salt, hash = excluded.hash, \
             hasher = excluded.hasher, created = excluded.created, \
             last_tried = NULL, last_used = NULL",
            params![
                credentials.user_no,
                credentials.salt,
                credentials.hash,
                credentials.hasher.to_string(),
                system_time_to_column(credentials.created),
            ],
        )
        .with_context(|| format!("Failed to set password of user {}", credentials.user_no))?;
        Ok(())
    }

    fn record_password_attempt(&self, user_no: usize, succeeded: bool) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let now = now_secs();
        if succeeded {
            conn.execute(
                "UPDATE user_password_credentials SET last_tried = ?1, last_used = ?1 \
                 WHERE user_no = ?2",
                params![now, user_no],
            )?;
        } else {
            conn.execute(
                "UPDATE user_password_credentials SET last_tried = ?1 WHERE user_no = ?2",
                params![now, user_no],
            )?;
        }
        Ok(())
    }
}

impl UserAuthTokenStore for SqliteUserStore {
    fn get_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let conn = self.conn.lock().unwrap();
        let token = conn
            .query_row(
                "SELECT user_no, created, last_used FROM auth_token WHERE value = ?1",
                params![token.0],
                |row| {
                    Ok(AuthToken {
                        user_no: row.get(0)?,
                        created: system_time_from_column_result(row.get(1)?),
                        last_used: row
                            .get::<usize, Option<i64>>(2)?
                            .map(system_time_from_column_result),
                        value: token.clone(),
                    })
                },
            )
            .optional()?;
        Ok(token)
    }

    fn delete_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let existing = self.get_user_auth_token(token)?;
        if existing.is_some() {
            let conn = self.conn.lock().unwrap();
            conn.execute("DELETE FROM auth_token WHERE value = ?1", params![token.0])?;
        }
        Ok(existing)
    }

    fn update_user_auth_token_last_used_timestamp(&self, token: &AuthTokenValue) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE auth_token SET last_used = ?1 WHERE value = ?2",
            params![now_secs(), token.0],
        )?;
        Ok(())
    }

    fn add_user_auth_token(&self, token: AuthToken) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO auth_token (user_no, value, created) VALUES (?1, ?2, ?3)",
            params![
                token.user_no,
                token.value.0,
                system_time_to_column(token.created)
            ],
        )
        .with_context(|| format!("Failed to add auth token for user {}", token.user_no))?;
        Ok(())
    }

    fn delete_all_user_auth_tokens(&self, user_no: usize) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.execute("DELETE FROM auth_token WHERE user_no = ?1", params![user_no])?)
    }
}

impl PlaylistStore for SqliteUserStore {
    fn create_playlist(&self, user_no: usize, title: &str, content: Option<&str>) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO playlist (user_no, title, content) VALUES (?1, ?2, ?3)",
            params![user_no, title, content],
        )
        .with_context(|| format!("Failed to create playlist for user {}", user_no))?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_playlist(&self, playlist_no: usize) -> Result<Option<Playlist>> {
        let sql = format!("{} WHERE p.playlist_no = ?1", PLAYLIST_SELECT);
        Ok(self
            .query_playlists(&sql, &[&playlist_no])?
            .into_iter()
            .next())
    }

    fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let sql = format!(
            "{} ORDER BY p.created_at DESC, p.playlist_no DESC",
            PLAYLIST_SELECT
        );
        self.query_playlists(&sql, &[])
    }

    fn list_user_playlists(&self, user_no: usize) -> Result<Vec<Playlist>> {
        let sql = format!(
            "{} WHERE p.user_no = ?1 ORDER BY p.created_at DESC, p.playlist_no DESC",
            PLAYLIST_SELECT
        );
        self.query_playlists(&sql, &[&user_no])
    }

    fn update_playlist(
        &self,
        playlist_no: usize,
        title: &str,
        content: Option<&str>,
    ) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE playlist SET title = ?1, content = ?2, updated_at = ?3 WHERE playlist_no = ?4",
            params![title, content, now_secs(), playlist_no],
        )?;
        Ok(updated > 0)
    }

    fn delete_playlist(&self, playlist_no: usize) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM music_list WHERE playlist_no = ?1",
            params![playlist_no],
        )?;
        let deleted = tx.execute(
            "DELETE FROM playlist WHERE playlist_no = ?1",
            params![playlist_no],
        )?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    fn add_music(&self, playlist_no: usize, music_no: usize) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO music_list (playlist_no, music_no) VALUES (?1, ?2)",
            params![playlist_no, music_no],
        )
        .with_context(|| {
            format!(
                "Failed to add music {} to playlist {}",
                music_no, playlist_no
            )
        })?;
        Ok(())
    }

    fn has_music(&self, playlist_no: usize, music_no: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM music_list WHERE playlist_no = ?1 AND music_no = ?2",
            params![playlist_no, music_no],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn remove_music(&self, playlist_no: usize, music_no: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM music_list WHERE playlist_no = ?1 AND music_no = ?2",
            params![playlist_no, music_no],
        )?;
        Ok(deleted > 0)
    }

    fn clear_music(&self, playlist_no: usize) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.execute(
            "DELETE FROM music_list WHERE playlist_no = ?1",
            params![playlist_no],
        )?)
    }

    fn list_music(&self, playlist_no: usize) -> Result<Vec<MusicListEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT playlist_no, music_no, created_at FROM music_list \
             WHERE playlist_no = ?1 ORDER BY id",
        )?;
        let entries = stmt
            .query_map(params![playlist_no], |row| {
                Ok(MusicListEntry {
                    playlist_no: row.get(0)?,
                    music_no: row.get(1)?,
                    added_at: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn playlists_with_music(&self, music_no: usize) -> Result<Vec<PlaylistRef>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT ml.playlist_no, ml.music_no, p.title FROM music_list ml \
             JOIN playlist p ON p.playlist_no = ml.playlist_no \
             WHERE ml.music_no = ?1 ORDER BY ml.playlist_no",
        )?;
        let refs = stmt
            .query_map(params![music_no], |row| {
                Ok(PlaylistRef {
                    playlist_no: row.get(0)?,
                    music_no: row.get(1)?,
                    playlist_title: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(refs)
    }

    fn remove_music_everywhere(&self, music_no: usize) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.execute(
            "DELETE FROM music_list WHERE music_no = ?1",
            params![music_no],
        )?)
    }
}

impl NoticeStore for SqliteUserStore {
    fn create_notice(&self, user_no: usize, title: &str, content: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO notice (user_no, title, content) VALUES (?1, ?2, ?3)",
            params![user_no, title, content],
        )
        .context("Failed to create notice")?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_notice(&self, notice_no: usize) -> Result<Option<Notice>> {
        let conn = self.conn.lock().unwrap();
        let notice = conn
            .query_row(
                &format!("{} WHERE n.notice_no = ?1", NOTICE_SELECT),
                params![notice_no],
                notice_from_row,
            )
            .optional()?;
        Ok(notice)
    }

    fn list_notices(&self) -> Result<Vec<Notice>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "{} ORDER BY n.created_at DESC, n.notice_no DESC",
            NOTICE_SELECT
        ))?;
        let notices = stmt
            .query_map([], notice_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notices)
    }

    fn update_notice(&self, notice_no: usize, title: &str, content: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE notice SET title = ?1, content = ?2, updated_at = ?3 WHERE notice_no = ?4",
            params![title, content, now_secs(), notice_no],
        )?;
        Ok(updated > 0)
    }

    fn delete_notice(&self, notice_no: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM notice WHERE notice_no = ?1", params![notice_no])?;
        Ok(deleted > 0)
    }
}
