//! Import of provider tracks into the local catalog.
//!
//! Every provider record goes through the same per-track step: records are
//! deduplicated on their external url, new ones are classified and inserted,
//! and a failure on one record never fails the batch it belongs to.

mod error;
mod pipeline;

pub use error::IngestionError;
pub use pipeline::{
    IngestedTrack, IngestionPipeline, SearchIngestResult, BULK_IMPORT_MAX_TRACKS,
    BULK_IMPORT_PAGE_SIZE,
};
