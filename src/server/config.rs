use super::RequestsLoggingLevel;
use crate::config::DEFAULT_TOP50_PLAYLIST_ID;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    /// Provider playlist served by `/music/top50`.
    pub top50_playlist_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 5000,
            metrics_port: 9091,
            top50_playlist_id: DEFAULT_TOP50_PLAYLIST_ID.to_string(),
        }
    }
}
