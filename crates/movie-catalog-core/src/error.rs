use std::path::PathBuf;

use thiserror::Error;

use crate::store::MovieId;

/// Errors from catalog mutations and saves.
///
/// Loading never produces one of these; see [`crate::CatalogStore::load`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("movie title must not be empty")]
    EmptyTitle,

    #[error("no movie with id {0}")]
    NotFound(MovieId),

    #[error("failed to write catalog to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}
