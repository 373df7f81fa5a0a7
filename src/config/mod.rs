mod file_config;

pub use file_config::{FileConfig, SpotifyConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1/";
pub const DEFAULT_SPOTIFY_MARKET: &str = "KR";
pub const DEFAULT_PROVIDER_TIMEOUT_SEC: u64 = 10;
/// Spotify's "Top 50 - South Korea" chart playlist.
pub const DEFAULT_TOP50_PLAYLIST_ID: &str = "37i9dQZEVXbNxXF4SkHj9F";

/// CLI arguments (and their environment fallbacks) used for config resolution.
/// TOML config values override these.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub top50_playlist_id: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_token_url: Option<String>,
    pub spotify_api_base: Option<String>,
    pub spotify_market: Option<String>,
    pub provider_timeout_sec: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub top50_playlist_id: String,

    /// None when the provider credentials are not configured.
    pub spotify: Option<SpotifySettings>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_base: String,
    pub market: String,
    pub timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let top50_playlist_id = file
            .top50_playlist_id
            .or_else(|| cli.top50_playlist_id.clone())
            .unwrap_or_else(|| DEFAULT_TOP50_PLAYLIST_ID.to_string());

        let spotify = resolve_spotify(cli, file.spotify.unwrap_or_default());

        Ok(Self {
            db_dir,
            port,
            metrics_port,
            logging_level,
            top50_playlist_id,
            spotify,
        })
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.db_dir.join("catalog.db")
    }

    pub fn user_db_path(&self) -> PathBuf {
        self.db_dir.join("user.db")
    }
}

fn resolve_spotify(cli: &CliConfig, file: SpotifyConfig) -> Option<SpotifySettings> {
    let client_id = file
        .client_id
        .or_else(|| cli.spotify_client_id.clone())
        .filter(|s| !s.is_empty());
    let client_secret = file
        .client_secret
        .or_else(|| cli.spotify_client_secret.clone())
        .filter(|s| !s.is_empty());

    let (client_id, client_secret) = match (client_id, client_secret) {
        (Some(id), Some(secret)) => (id, secret),
        (None, None) => return None,
        _ => {
            warn!("Only one of the Spotify client id and secret is configured, ignoring it");
            return None;
        }
    };

    Some(SpotifySettings {
        client_id,
        client_secret,
        token_url: file
            .token_url
            .or_else(|| cli.spotify_token_url.clone())
            .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
        api_base: file
            .api_base
            .or_else(|| cli.spotify_api_base.clone())
            .unwrap_or_else(|| DEFAULT_SPOTIFY_API_BASE.to_string()),
        market: file
            .market
            .or_else(|| cli.spotify_market.clone())
            .unwrap_or_else(|| DEFAULT_SPOTIFY_MARKET.to_string()),
        timeout_sec: file
            .timeout_sec
            .or(cli.provider_timeout_sec)
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SEC),
    })
}

/// Parses a logging level string into RequestsLoggingLevel.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
