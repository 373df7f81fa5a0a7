//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog and user database.

use super::constants::*;
use super::fixtures::{create_test_catalog, create_test_db_with_users};
use super::provider::FakeProvider;
use listify_server::catalog_store::{CatalogStore, SqliteCatalogStore};
use listify_server::provider::CatalogProvider;
use listify_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use listify_server::user::{FullUserStore, SqliteUserStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated catalog and database
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    #[allow(dead_code)]
    pub port: u16,

    /// Catalog store for direct database access in tests
    #[allow(dead_code)]
    pub catalog_store: Arc<dyn CatalogStore>,

    /// User store for direct database access in tests
    #[allow(dead_code)]
    pub user_store: Arc<dyn FullUserStore>,

    // Private fields - keep resources alive until drop
    _temp_catalog_dir: TempDir,
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port, backed by the fake provider.
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Some(Arc::new(FakeProvider) as Arc<dyn CatalogProvider>)).await
    }

    /// Spawns a test server with no provider configured.
    #[allow(dead_code)]
    pub async fn spawn_without_provider() -> Self {
        Self::spawn_with_provider(None).await
    }

    /// # Panics
    ///
    /// Panics if fixture creation, port binding or server startup fails, or if
    /// the server doesn't become ready within the timeout.
    async fn spawn_with_provider(provider: Option<Arc<dyn CatalogProvider>>) -> Self {
        let (temp_catalog_dir, catalog_db_path) =
            create_test_catalog().expect("Failed to create test catalog");
        let (temp_db_dir, db_path) =
            create_test_db_with_users().expect("Failed to create test database");

        let catalog_store: Arc<dyn CatalogStore> = Arc::new(
            SqliteCatalogStore::new(&catalog_db_path).expect("Failed to open catalog store"),
        );
        let user_store: Arc<dyn FullUserStore> =
            Arc::new(SqliteUserStore::new(&db_path).expect("Failed to open user store"));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            metrics_port: 0,
            top50_playlist_id: TOP50_PLAYLIST_ID.to_string(),
        };

        let app = make_app(config, catalog_store.clone(), user_store.clone(), provider)
            .expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            catalog_store,
            user_store,
            _temp_catalog_dir: temp_catalog_dir,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
