//! Listify Server Library
//!
//! This library exposes the internal modules for testing and reuse by the binaries.

pub mod catalog_store;
pub mod config;
pub mod genre;
pub mod ingestion;
pub mod provider;
pub mod server;
pub mod sqlite_persistence;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use ingestion::IngestionPipeline;
pub use provider::{CatalogProvider, SpotifyClient};
pub use server::{run_server, RequestsLoggingLevel};
pub use user::{SqliteUserStore, UserManager, UserRole};
