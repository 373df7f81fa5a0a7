//! Mapping of provider genre tags onto the local genre vocabulary.

mod classifier;

pub use classifier::{canonical_genre, classify};
