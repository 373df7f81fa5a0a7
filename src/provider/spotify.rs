//! HTTP client for the Spotify Web API using the client-credentials flow.

use super::models::{
    PlaylistTracksResponse, ProviderArtist, ProviderTrack, SearchResponse, TokenResponse,
    TrackPage,
};
use super::CatalogProvider;
use crate::config::SpotifySettings;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);
const DEFAULT_TOKEN_LIFETIME_SEC: u64 = 3600;

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

pub struct SpotifyClient {
    client: reqwest::Client,
    settings: SpotifySettings,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(settings: SpotifySettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            settings,
            token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_base.trim_end_matches('/'), path)
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.lock().unwrap().as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *self.token.lock().unwrap() = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        debug!("Requesting provider access token");
        let response = self
            .client
            .post(&self.settings.token_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .context("Failed to connect to the provider token endpoint")?;

        if !response.status().is_success() {
            bail!(
                "Provider token request failed with status: {}",
                response.status()
            );
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SEC));
        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.endpoint(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} from provider", what))?;

        if !response.status().is_success() {
            bail!("Failed to fetch {}: status {}", what, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }
}

#[async_trait]
impl CatalogProvider for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: usize, offset: usize) -> Result<TrackPage> {
        let response: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                    ("market", self.settings.market.clone()),
                ],
                "search results",
            )
            .await?;
        Ok(response.tracks)
    }

    async fn fetch_artist(&self, artist_id: &str) -> Result<ProviderArtist> {
        self.get_json(&format!("artists/{}", artist_id), &[], "artist")
            .await
    }

    async fn fetch_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<ProviderTrack>> {
        let response: PlaylistTracksResponse = self
            .get_json(
                &format!("playlists/{}/tracks", playlist_id),
                &[
                    ("limit", limit.to_string()),
                    ("market", self.settings.market.clone()),
                ],
                "playlist tracks",
            )
            .await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .collect())
    }
}
