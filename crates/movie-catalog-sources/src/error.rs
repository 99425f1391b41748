use thiserror::Error;

/// Why a metadata lookup produced nothing usable.
///
/// The two precondition variants display as the prompts shown to the user
/// before any request is made.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Enter a title first.")]
    MissingTitle,

    #[error("Set TMDB API key first.")]
    MissingApiKey,

    #[error("invalid TMDB API key")]
    Unauthorized,

    #[error("TMDB rate limit exceeded")]
    RateLimited,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("lookup task failed: {0}")]
    TaskFailed(String),
}

impl LookupError {
    /// True for errors raised before any request was sent
    pub fn is_precondition(&self) -> bool {
        matches!(self, LookupError::MissingTitle | LookupError::MissingApiKey)
    }
}
