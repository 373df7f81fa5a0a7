use thiserror::Error;

/// Batch-level ingestion failures.
///
/// Per-track failures are never reported here, they only drop the track
/// from the batch result.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Catalog provider error: {0:#}")]
    Provider(anyhow::Error),
}
