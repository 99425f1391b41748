use async_trait::async_trait;
use movie_catalog_models::{MovieDraft, MovieMetadata};

use crate::error::LookupError;

/// Title (and optional year) to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub title: String,
    pub year: Option<String>,
}

impl LookupRequest {
    pub fn new(title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            year: year
                .map(|y| y.trim().to_string())
                .filter(|y| !y.is_empty()),
        }
    }

    pub fn from_draft(draft: &MovieDraft) -> Self {
        Self::new(draft.title.clone(), Some(draft.year.clone()))
    }
}

/// A metadata provider that can find the best match for a title.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Whether the provider is configured well enough to send requests
    fn is_available(&self) -> bool;

    /// Best match for `request`, or `None` when the provider has no result
    async fn best_match(&self, request: &LookupRequest) -> Result<Option<MovieMetadata>, LookupError>;
}
