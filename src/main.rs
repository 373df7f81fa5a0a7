use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use listify_server::catalog_store::{CatalogStore, SqliteCatalogStore};
use listify_server::config::{AppConfig, CliConfig, FileConfig};
use listify_server::provider::{CatalogProvider, SpotifyClient};
use listify_server::server::{self, run_server, RequestsLoggingLevel, ServerConfig};
use listify_server::user::SqliteUserStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Existing directory holding catalog.db and user.db.
    #[clap(long, env = "LISTIFY_DB_DIR", value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Optional TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Provider playlist served by /music/top50.
    #[clap(long)]
    pub top50_playlist_id: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    #[clap(long, env = "SPOTIFY_TOKEN_URL")]
    pub spotify_token_url: Option<String>,

    #[clap(long, env = "SPOTIFY_API_BASE")]
    pub spotify_api_base: Option<String>,

    /// Market used for provider searches.
    #[clap(long)]
    pub spotify_market: Option<String>,

    /// Timeout in seconds for provider requests.
    #[clap(long)]
    pub provider_timeout_sec: Option<u64>,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            db_dir: args.db_dir.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            top50_playlist_id: args.top50_playlist_id.clone(),
            spotify_client_id: args.spotify_client_id.clone(),
            spotify_client_secret: args.spotify_client_secret.clone(),
            spotify_token_url: args.spotify_token_url.clone(),
            spotify_api_base: args.spotify_api_base.clone(),
            spotify_market: args.spotify_market.clone(),
            provider_timeout_sec: args.provider_timeout_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;

    info!(
        "Opening SQLite catalog database at {:?}...",
        app_config.catalog_db_path()
    );
    let catalog_store = Arc::new(SqliteCatalogStore::new(app_config.catalog_db_path())?);

    info!("Initializing metrics...");
    server::metrics::init_metrics();
    server::metrics::set_catalog_size(catalog_store.count_tracks()?);

    info!(
        "Opening SQLite user database at {:?}...",
        app_config.user_db_path()
    );
    let user_store = Arc::new(SqliteUserStore::new(app_config.user_db_path())?);

    let provider: Option<Arc<dyn CatalogProvider>> = match app_config.spotify.clone() {
        Some(settings) => {
            info!(
                "Spotify client configured (market {}, api {})",
                settings.market, settings.api_base
            );
            Some(Arc::new(SpotifyClient::new(settings)?) as Arc<dyn CatalogProvider>)
        }
        None => {
            warn!("Spotify credentials not configured, provider routes are disabled");
            None
        }
    };

    let config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        top50_playlist_id: app_config.top50_playlist_id.clone(),
    };

    info!("Ready to serve at port {}!", app_config.port);
    info!("Metrics available at port {}!", app_config.metrics_port);
    run_server(config, catalog_store, user_store, provider).await
}
