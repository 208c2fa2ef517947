//! The recommendation reconciliation pipeline.
//!
//! Fans out to the analyzer and generator concurrently, resolves every
//! candidate title against the catalog, and merges the results into a
//! deduplicated envelope. Pagination threads an explicit [`SessionContext`]
//! so nothing already shown is surfaced twice.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    error::{AppError, AppResult},
    models::{MediaItem, MediaKey, RecommendedTitle, ResultEnvelope},
    services::{analyzer::InputAnalyzer, catalog::MediaCatalog, generator::TitleGenerator},
};

/// Cap on concurrent per-title catalog resolutions
const RESOLVE_CONCURRENCY: usize = 8;

/// Autocomplete returns at most this many suggestions
const SUGGESTION_LIMIT: usize = 5;

/// Continuation state for "load more": the original query plus everything
/// already delivered, keyed for exclusion.
///
/// The caller accumulates items across pages and rebuilds the context per
/// request; the pipeline itself holds no session state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    query: String,
    shown_titles: Vec<String>,
    shown_keys: HashSet<MediaKey>,
}

impl SessionContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            shown_titles: Vec::new(),
            shown_keys: HashSet::new(),
        }
    }

    /// Records an already-delivered item for exclusion on the next page.
    pub fn record(&mut self, key: MediaKey, title: impl Into<String>) {
        if self.shown_keys.insert(key) {
            self.shown_titles.push(title.into());
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn shown(&self) -> usize {
        self.shown_keys.len()
    }
}

/// Orchestrates analyzer, generator, and catalog into display-ready results
pub struct RecommendationPipeline {
    analyzer: Arc<dyn InputAnalyzer>,
    generator: Arc<dyn TitleGenerator>,
    catalog: Arc<dyn MediaCatalog>,
}

impl RecommendationPipeline {
    pub fn new(
        analyzer: Arc<dyn InputAnalyzer>,
        generator: Arc<dyn TitleGenerator>,
        catalog: Arc<dyn MediaCatalog>,
    ) -> Self {
        Self {
            analyzer,
            generator,
            catalog,
        }
    }

    /// First page of a session.
    ///
    /// The analyzer and generator run concurrently as a hard pair: either
    /// failure aborts the request, since there is no meaningful result
    /// without both. Candidates then resolve against the catalog.
    pub async fn run_initial(&self, user_input: &str) -> AppResult<ResultEnvelope> {
        let query = user_input.trim();
        if query.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let (analysis, candidates) = tokio::try_join!(
            self.analyzer.analyze(query),
            self.generator.generate(query, &[]),
        )?;

        if candidates.is_empty() {
            return Err(AppError::NoRecommendations);
        }

        tracing::info!(candidates = candidates.len(), "Resolving fresh recommendations");

        let media = self.resolve_candidates(candidates, HashSet::new()).await;
        if media.is_empty() {
            // Distinct from NoRecommendations: the model proposed titles,
            // but none of them exist in the catalog.
            return Err(AppError::NoMatchesInCatalog);
        }

        Ok(ResultEnvelope {
            media,
            analysis: Some(analysis),
        })
    }

    /// Continuation page.
    ///
    /// Only the generator runs again; the first page's analysis stays valid
    /// for the whole session. An exhausted generator is a normal terminal
    /// state here, not an error.
    pub async fn run_more(&self, session: &SessionContext) -> AppResult<ResultEnvelope> {
        let query = session.query.trim();
        if query.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let candidates = self.generator.generate(query, &session.shown_titles).await?;
        if candidates.is_empty() {
            return Ok(ResultEnvelope {
                media: Vec::new(),
                analysis: None,
            });
        }

        tracing::info!(
            candidates = candidates.len(),
            excluded = session.shown_keys.len(),
            "Resolving continuation"
        );

        let media = self
            .resolve_candidates(candidates, session.shown_keys.clone())
            .await;

        Ok(ResultEnvelope {
            media,
            analysis: None,
        })
    }

    /// Catalog-backed autocomplete, top results by catalog ranking.
    pub async fn suggest(&self, query: &str) -> Vec<MediaItem> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut items = self.catalog.search(query, None).await;
        items.truncate(SUGGESTION_LIMIT);
        items
    }

    /// Resolves candidates concurrently (bounded) and deduplicates.
    ///
    /// Tasks are joined in spawn order, so the output keeps the generator's
    /// emission order no matter when individual resolutions complete. `seen`
    /// starts as the exclusion set and grows with every kept item, making
    /// in-batch dedup and cross-page exclusion the same check. A failed or
    /// absent resolution drops that candidate and nothing else.
    async fn resolve_candidates(
        &self,
        candidates: Vec<RecommendedTitle>,
        mut seen: HashSet<MediaKey>,
    ) -> Vec<MediaItem> {
        let limiter = Arc::new(Semaphore::new(RESOLVE_CONCURRENCY));
        let mut tasks = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let catalog = Arc::clone(&self.catalog);
            let limiter = Arc::clone(&limiter);
            tasks.push(tokio::spawn(async move {
                let _permit = limiter.acquire_owned().await.ok()?;
                catalog
                    .resolve_by_title(&candidate.title, candidate.media_type)
                    .await
            }));
        }

        let mut media = Vec::new();
        let mut dropped = 0usize;
        for task in tasks {
            match task.await {
                Ok(Some(item)) => {
                    if seen.insert(item.key()) {
                        media.push(item);
                    } else {
                        dropped += 1;
                    }
                }
                Ok(None) => dropped += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Title resolution task failed");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::debug!(kept = media.len(), dropped, "Candidate resolution merged");
        }

        media
    }
}
