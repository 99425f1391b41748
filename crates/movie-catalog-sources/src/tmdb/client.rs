use std::time::Duration;

use async_trait::async_trait;
use movie_catalog_config::LookupConfig;
use movie_catalog_models::MovieMetadata;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::LookupError;
use crate::tmdb::api::SearchResponse;
use crate::traits::{LookupRequest, MetadataLookup};

/// TMDB movie search client.
///
/// Needs an API key for every request; requests time out after
/// `LookupConfig::timeout_secs`.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, config: &LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("reelshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into().trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
        })
    }

    /// Run `/search/movie` and return the raw response
    pub async fn search_movies(&self, request: &LookupRequest) -> Result<SearchResponse, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let url = format!("{}/search/movie", self.base_url);
        debug!("TMDB movie search: query='{}', year={:?}", request.title, request.year);

        let mut http_request = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", request.title.as_str())]);
        if let Some(year) = &request.year {
            http_request = http_request.query(&[("primary_release_year", year.as_str())]);
        }

        let response = http_request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LookupError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| LookupError::Parse(format!("Failed to parse movie search response: {}", e)))
    }
}

#[async_trait]
impl MetadataLookup for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn best_match(&self, request: &LookupRequest) -> Result<Option<MovieMetadata>, LookupError> {
        let response = self.search_movies(request).await?;
        let best = response.best_match(&self.image_base_url);
        match &best {
            Some(metadata) => info!(
                "TMDB match for '{}': year={}, rating={:.1}",
                request.title, metadata.year, metadata.rating
            ),
            None => info!("No TMDB match for '{}'", request.title),
        }
        Ok(best)
    }
}
