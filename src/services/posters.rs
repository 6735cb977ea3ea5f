use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinSet;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::Movie,
};

/// Catalog entries enriched per listing
pub const ENRICH_LIMIT: usize = 50;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Fragment of a stale poster URL present in older catalog files
const STALE_POSTER_MARKER: &str = "9gk7adHYeDvHkCSEqAvQNLV5nfge";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    #[serde(default)]
    poster: Option<String>,
}

/// Best-effort poster lookup against OMDb with an in-memory cache
///
/// Cloning shares the cache and the HTTP client.
#[derive(Clone)]
pub struct PosterService {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    capacity: usize,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl PosterService {
    pub fn new(api_key: Option<String>, api_url: String, capacity: usize) -> Self {
        let http_client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url,
            capacity,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.omdb_api_key.is_none() {
            tracing::info!("OMDB_API_KEY not set, serving placeholder posters");
        }
        Self::new(
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
            config.poster_cache_capacity,
        )
    }

    /// Placeholder image seeded by the title
    pub fn placeholder(title: &str) -> String {
        let seed: String = title.split_whitespace().collect();
        format!("https://picsum.photos/seed/{seed}/500/750")
    }

    fn has_usable_poster(movie: &Movie) -> bool {
        movie
            .poster_url
            .as_deref()
            .is_some_and(|url| !url.is_empty() && !url.contains(STALE_POSTER_MARKER))
    }

    /// Poster URL for a title, never failing
    pub async fn poster_for(&self, title: &str, year: i32) -> String {
        let key = format!("{title}_{year}");

        if let Some(url) = self.cache.read().await.get(&key) {
            return url.clone();
        }

        match self.fetch(title, year).await {
            Ok(Some(url)) => {
                let mut cache = self.cache.write().await;
                if cache.len() < self.capacity {
                    cache.insert(key, url.clone());
                }
                url
            }
            Ok(None) => Self::placeholder(title),
            Err(e) => {
                tracing::warn!(title, year, error = %e, "Poster lookup failed");
                Self::placeholder(title)
            }
        }
    }

    async fn fetch(&self, title: &str, year: i32) -> AppResult<Option<String>> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let year = year.to_string();
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("apikey", api_key.as_str()),
                ("t", title),
                ("y", year.as_str()),
                ("type", "movie"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "OMDb returned {}",
                response.status()
            )));
        }

        let body: OmdbResponse = response.json().await?;
        Ok(body
            .poster
            .filter(|poster| body.response == "True" && poster != "N/A"))
    }

    /// Fills in posters for the first [`ENRICH_LIMIT`] movies, keeping order
    pub async fn enrich(&self, movies: &[Movie]) -> Vec<Movie> {
        let mut enriched: Vec<Movie> = movies.iter().take(ENRICH_LIMIT).cloned().collect();

        let mut lookups = JoinSet::new();
        for (index, movie) in enriched.iter().enumerate() {
            if Self::has_usable_poster(movie) {
                continue;
            }
            let service = self.clone();
            let title = movie.title_en.clone();
            let year = movie.year;
            lookups.spawn(async move { (index, service.poster_for(&title, year).await) });
        }

        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, url)) => {
                    enriched[index].backdrop_url = Some(url.clone());
                    enriched[index].poster_url = Some(url);
                }
                Err(e) => tracing::error!(error = %e, "Poster task join error"),
            }
        }

        enriched
    }

    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }
}
