use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{MediaKey, MediaType, ResultEnvelope},
    services::pipeline::SessionContext,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_input: String,
}

/// An item the client has already shown, echoed back for exclusion
#[derive(Debug, Deserialize)]
pub struct SeenMedia {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct MoreRecommendationsRequest {
    pub user_input: String,
    #[serde(default)]
    pub existing: Vec<SeenMedia>,
}

/// Handler for a fresh recommendation query
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<ResultEnvelope>> {
    let envelope = state.pipeline.run_initial(&request.user_input).await?;
    Ok(Json(envelope))
}

/// Handler for "load more": continues a session without re-analyzing
pub async fn recommend_more(
    State(state): State<AppState>,
    Json(request): Json<MoreRecommendationsRequest>,
) -> AppResult<Json<ResultEnvelope>> {
    let mut session = SessionContext::new(request.user_input);
    for seen in request.existing {
        session.record(
            MediaKey {
                id: seen.id,
                media_type: seen.media_type,
            },
            seen.title,
        );
    }

    let envelope = state.pipeline.run_more(&session).await?;
    Ok(Json(envelope))
}
