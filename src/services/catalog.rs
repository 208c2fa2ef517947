use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        CastMember, GenreMap, MediaItem, MediaType, Review, TmdbCreditsResponse, TmdbGenreList,
        TmdbReviewsResponse, TmdbSearchResponse, TmdbVideosResponse, Video,
    },
};

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const DETAIL_CACHE_TTL: u64 = 604800; // 1 week
const LANGUAGE: &str = "en-US";

/// Unified view of the external media catalog
///
/// Every method is fail-soft: a missing credential, transport errors, and
/// non-success statuses degrade to empty results. One unavailable lookup
/// should thin out a recommendation batch, never sink it.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Searches the catalog; combined search when `media_type` is `None`,
    /// in which case non-movie/non-series result kinds are filtered out.
    async fn search(&self, query: &str, media_type: Option<MediaType>) -> Vec<MediaItem>;

    /// Resolves a title to its best (catalog-ranked) match of the given type.
    async fn resolve_by_title(&self, title: &str, media_type: MediaType) -> Option<MediaItem>;

    /// The process-wide genre id to name mapping.
    async fn genre_map(&self) -> GenreMap;

    async fn videos(&self, id: u64, media_type: MediaType) -> Vec<Video>;

    async fn credits(&self, id: u64, media_type: MediaType) -> Vec<CastMember>;

    async fn reviews(&self, id: u64, media_type: MediaType) -> Vec<Review>;
}

/// TMDB-backed catalog client
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
    /// Populated once per process by the first successful fetch; concurrent
    /// first accesses share a single in-flight request.
    genres: OnceCell<GenreMap>,
}

impl TmdbCatalog {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("Catalog API key is not configured; catalog lookups will return empty results");
        }

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
            genres: OnceCell::new(),
        }
    }

    fn credential(&self) -> AppResult<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            Err(AppError::Catalog("API key is not configured".to_string()))
        } else {
            Ok(key)
        }
    }

    /// GET against the catalog with the credential and standard params.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let api_key = self.credential()?;
        let url = format!("{}/{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", LANGUAGE)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn try_search(
        &self,
        query: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MediaItem>> {
        let key = CacheKey::Search {
            query: query.to_string(),
            media_type,
        };

        cached!(self.cache, key, SEARCH_CACHE_TTL, async {
            let endpoint = match media_type {
                Some(media_type) => format!("search/{}", media_type),
                None => "search/multi".to_string(),
            };

            let response: TmdbSearchResponse = self
                .get_json(
                    &endpoint,
                    &[("query", query), ("include_adult", "false"), ("page", "1")],
                )
                .await?;

            let items: Vec<MediaItem> = response
                .results
                .into_iter()
                .filter_map(|raw| match media_type {
                    // Typed search rows carry no tag; the endpoint decides.
                    Some(media_type) => Some(raw.into_media_item(media_type)),
                    // Combined search interleaves person rows; keep movie/tv only.
                    None => raw.tagged_type().map(|tagged| raw.into_media_item(tagged)),
                })
                .collect();

            tracing::info!(query = %query, results = items.len(), "Catalog search completed");

            Ok::<_, AppError>(items)
        })
    }

    async fn fetch_genre_map(&self) -> AppResult<GenreMap> {
        let (movie, tv) = tokio::try_join!(
            self.get_json::<TmdbGenreList>("genre/movie/list", &[]),
            self.get_json::<TmdbGenreList>("genre/tv/list", &[]),
        )?;

        let map = GenreMap::from_lists(movie.genres, tv.genres);
        tracing::info!(genres = map.len(), "Genre map populated");
        Ok(map)
    }

    async fn try_videos(&self, id: u64, media_type: MediaType) -> AppResult<Vec<Video>> {
        let key = CacheKey::Videos { id, media_type };
        cached!(self.cache, key, DETAIL_CACHE_TTL, async {
            let response: TmdbVideosResponse = self
                .get_json(&format!("{}/{}/videos", media_type, id), &[])
                .await?;
            Ok::<_, AppError>(response.results)
        })
    }

    async fn try_credits(&self, id: u64, media_type: MediaType) -> AppResult<Vec<CastMember>> {
        let key = CacheKey::Credits { id, media_type };
        cached!(self.cache, key, DETAIL_CACHE_TTL, async {
            let response: TmdbCreditsResponse = self
                .get_json(&format!("{}/{}/credits", media_type, id), &[])
                .await?;
            Ok::<_, AppError>(response.cast)
        })
    }

    async fn try_reviews(&self, id: u64, media_type: MediaType) -> AppResult<Vec<Review>> {
        let key = CacheKey::Reviews { id, media_type };
        cached!(self.cache, key, DETAIL_CACHE_TTL, async {
            let response: TmdbReviewsResponse = self
                .get_json(&format!("{}/{}/reviews", media_type, id), &[])
                .await?;
            Ok::<_, AppError>(response.results)
        })
    }
}

#[async_trait]
impl MediaCatalog for TmdbCatalog {
    async fn search(&self, query: &str, media_type: Option<MediaType>) -> Vec<MediaItem> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.try_search(query, media_type).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Catalog search failed");
                Vec::new()
            }
        }
    }

    async fn resolve_by_title(&self, title: &str, media_type: MediaType) -> Option<MediaItem> {
        self.search(title, Some(media_type)).await.into_iter().next()
    }

    async fn genre_map(&self) -> GenreMap {
        match self.genres.get_or_try_init(|| self.fetch_genre_map()).await {
            Ok(map) => map.clone(),
            // Not cached: the next call retries the fetch.
            Err(e) => {
                tracing::warn!(error = %e, "Genre list fetch failed");
                GenreMap::default()
            }
        }
    }

    async fn videos(&self, id: u64, media_type: MediaType) -> Vec<Video> {
        match self.try_videos(id, media_type).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(error = %e, id, media_type = %media_type, "Video fetch failed");
                Vec::new()
            }
        }
    }

    async fn credits(&self, id: u64, media_type: MediaType) -> Vec<CastMember> {
        match self.try_credits(id, media_type).await {
            Ok(cast) => cast,
            Err(e) => {
                tracing::warn!(error = %e, id, media_type = %media_type, "Credits fetch failed");
                Vec::new()
            }
        }
    }

    async fn reviews(&self, id: u64, media_type: MediaType) -> Vec<Review> {
        match self.try_reviews(id, media_type).await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!(error = %e, id, media_type = %media_type, "Reviews fetch failed");
                Vec::new()
            }
        }
    }
}
