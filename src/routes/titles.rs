use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{models::MediaItem, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// Handler for catalog-backed autocomplete suggestions
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<MediaItem>> {
    Json(state.pipeline.suggest(&params.q).await)
}
