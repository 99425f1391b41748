//! TMDB `/search/movie` response shapes and their mapping to [`MovieMetadata`].

use movie_catalog_models::MovieMetadata;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl SearchResponse {
    /// TMDB ranks results by relevance; the first one is taken as the match
    pub fn best_match(&self, image_base_url: &str) -> Option<MovieMetadata> {
        self.results.first().map(|r| r.to_metadata(image_base_url))
    }
}

impl MovieResult {
    pub fn to_metadata(&self, image_base_url: &str) -> MovieMetadata {
        let poster_url = match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", image_base_url.trim_end_matches('/'), path),
            _ => String::new(),
        };
        let year = self
            .release_date
            .as_deref()
            .map(MovieMetadata::year_from_release_date)
            .unwrap_or_default();

        MovieMetadata::new(poster_url, year, self.vote_average.unwrap_or(0.0))
    }
}
