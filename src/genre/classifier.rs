use crate::catalog_store::CatalogStore;
use tracing::{debug, warn};

/// Raw provider genre tags, lower-cased, and the local genre they map to.
/// Tags not listed here are ignored.
const TAG_TO_GENRE: &[(&str, &str)] = &[
    ("k-pop", "K-Pop"),
    ("korean pop", "K-Pop"),
    ("k-pop boy group", "K-Pop"),
    ("k-pop girl group", "K-Pop"),
    ("pop", "Pop"),
    ("dance pop", "Pop"),
    ("j-pop", "Pop"),
    ("rock", "Rock"),
    ("alternative rock", "Rock"),
    ("k-rock", "Rock"),
    ("hip hop", "Hip-Hop"),
    ("hip-hop", "Hip-Hop"),
    ("rap", "Hip-Hop"),
    ("k-rap", "Hip-Hop"),
    ("korean hip hop", "Hip-Hop"),
    ("r&b", "R&B"),
    ("k-r&b", "R&B"),
    ("korean r&b", "R&B"),
    ("jazz", "Jazz"),
    ("edm", "Electronic"),
    ("electronic", "Electronic"),
    ("electropop", "Electronic"),
    ("house", "Electronic"),
    ("k-ballad", "Ballad"),
    ("ballad", "Ballad"),
    ("indie", "Indie"),
    ("k-indie", "Indie"),
];

/// Canonical local genre name for a single raw tag.
pub fn canonical_genre(tag: &str) -> Option<&'static str> {
    let tag = tag.trim().to_lowercase();
    TAG_TO_GENRE
        .iter()
        .find(|(raw, _)| *raw == tag)
        .map(|(_, genre)| *genre)
}

/// Classifies a track from its first artist's raw genre tags.
///
/// The first tag, in the given order, that has a canonical genre decides the
/// classification. Its genre number is looked up in the catalog; a failed
/// lookup yields no classification rather than an error.
pub fn classify<S: AsRef<str>>(tags: &[S], catalog_store: &dyn CatalogStore) -> Option<usize> {
    let genre_name = tags.iter().find_map(|tag| canonical_genre(tag.as_ref()))?;
    match catalog_store.find_genre_id_by_name(genre_name) {
        Ok(Some(genre_no)) => Some(genre_no),
        Ok(None) => {
            debug!("Genre {} is not in the catalog vocabulary", genre_name);
            None
        }
        Err(err) => {
            warn!("Genre lookup for {} failed: {:#}", genre_name, err);
            None
        }
    }
}
