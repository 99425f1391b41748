use serde::{Deserialize, Serialize};

use crate::movie::clamp_rating;

/// Best match returned by a metadata lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    /// Absolute poster image URL, empty when the match has no poster
    pub poster_url: String,
    /// Four-digit release year, empty when unknown
    pub year: String,
    /// Average vote on a 0-10 scale
    pub rating: f64,
}

impl MovieMetadata {
    pub fn new(poster_url: impl Into<String>, year: impl Into<String>, rating: f64) -> Self {
        Self {
            poster_url: poster_url.into(),
            year: year.into(),
            rating: clamp_rating(rating),
        }
    }

    /// Year taken from a `YYYY-MM-DD` (or partial) release date
    pub fn year_from_release_date(release_date: &str) -> String {
        release_date.trim().chars().take(4).collect()
    }
}
