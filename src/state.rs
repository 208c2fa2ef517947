use std::sync::Arc;

use crate::services::{catalog::MediaCatalog, pipeline::RecommendationPipeline};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RecommendationPipeline>,
    pub catalog: Arc<dyn MediaCatalog>,
}

impl AppState {
    pub fn new(pipeline: Arc<RecommendationPipeline>, catalog: Arc<dyn MediaCatalog>) -> Self {
        Self { pipeline, catalog }
    }
}
