//! Background metadata lookups.
//!
//! A lookup runs on its own tokio task so the caller stays responsive. The
//! caller awaits the [`LookupTask`] and applies the outcome to its draft on
//! its own task; the spawned task never touches caller state.

use std::sync::Arc;

use movie_catalog_models::{MovieDraft, MovieMetadata};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::traits::{LookupRequest, MetadataLookup};

/// Result of a finished lookup
#[derive(Debug)]
pub enum LookupOutcome {
    Found(MovieMetadata),
    NoMatch,
    Failed(LookupError),
}

impl LookupOutcome {
    /// Message suitable for a status line
    pub fn status_message(&self) -> String {
        match self {
            LookupOutcome::Found(_) => "TMDB data fetched.".to_string(),
            LookupOutcome::NoMatch => "No TMDB match found.".to_string(),
            LookupOutcome::Failed(e) if e.is_precondition() => e.to_string(),
            LookupOutcome::Failed(e) => format!("TMDB error: {}", e),
        }
    }

    pub fn metadata(&self) -> Option<&MovieMetadata> {
        match self {
            LookupOutcome::Found(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// Fill `draft` from a successful match; other outcomes leave it untouched.
    ///
    /// Returns whether the draft was changed.
    pub fn apply_to(&self, draft: &mut MovieDraft) -> bool {
        match self.metadata() {
            Some(metadata) => {
                draft.apply_metadata(metadata);
                true
            }
            None => false,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

impl From<Result<Option<MovieMetadata>, LookupError>> for LookupOutcome {
    fn from(result: Result<Option<MovieMetadata>, LookupError>) -> Self {
        match result {
            Ok(Some(metadata)) => LookupOutcome::Found(metadata),
            Ok(None) => LookupOutcome::NoMatch,
            Err(e) => LookupOutcome::Failed(e),
        }
    }
}

/// Handle to an in-flight lookup.
///
/// There is no cancellation; starting another lookup runs independently.
pub struct LookupTask {
    handle: JoinHandle<Result<Option<MovieMetadata>, LookupError>>,
}

impl LookupTask {
    /// Spawn `provider.best_match(request)` onto the current tokio runtime
    pub fn spawn(provider: Arc<dyn MetadataLookup>, request: LookupRequest) -> Self {
        debug!("Spawning {} lookup for '{}'", provider.provider_name(), request.title);
        let handle = tokio::spawn(async move { provider.best_match(&request).await });
        Self { handle }
    }

    /// Wait for the lookup to finish
    pub async fn outcome(self) -> LookupOutcome {
        match self.handle.await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("Metadata lookup failed: {}", e);
                }
                LookupOutcome::from(result)
            }
            Err(join_error) => {
                warn!("Metadata lookup task did not complete: {}", join_error);
                LookupOutcome::Failed(LookupError::TaskFailed(join_error.to_string()))
            }
        }
    }
}

/// Check the draft and provider, then start a lookup for the draft's title and year.
///
/// A blank title or an unconfigured provider is rejected without spawning anything.
pub fn start_lookup(provider: Arc<dyn MetadataLookup>, draft: &MovieDraft) -> Result<LookupTask, LookupError> {
    let request = LookupRequest::from_draft(draft);
    if request.title.is_empty() {
        return Err(LookupError::MissingTitle);
    }
    if !provider.is_available() {
        return Err(LookupError::MissingApiKey);
    }
    Ok(LookupTask::spawn(provider, request))
}
