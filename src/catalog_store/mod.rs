//! Catalog of ingested tracks and the local genre vocabulary.

mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{CategoryFilter, Genre, NewTrack, Track};
pub use schema::SEED_GENRES;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;

#[cfg(test)]
pub(crate) use store::tests::{create_tmp_store, reject_inserts_of};
