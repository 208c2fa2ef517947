use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{CastMember, GenreMap, MediaType, Review, Video},
    state::AppState,
};

fn parse_media_type(raw: &str) -> AppResult<MediaType> {
    raw.parse().map_err(AppError::InvalidInput)
}

/// Handler for the genre id to name mapping
pub async fn genres(State(state): State<AppState>) -> Json<GenreMap> {
    Json(state.catalog.genre_map().await)
}

/// Handler for a title's videos
pub async fn videos(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, u64)>,
) -> AppResult<Json<Vec<Video>>> {
    let media_type = parse_media_type(&media_type)?;
    Ok(Json(state.catalog.videos(id, media_type).await))
}

/// Handler for a title's best trailer, by the deterministic selection policy
pub async fn trailer(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, u64)>,
) -> AppResult<Json<Option<Video>>> {
    let media_type = parse_media_type(&media_type)?;
    let videos = state.catalog.videos(id, media_type).await;
    Ok(Json(Video::pick_trailer(&videos).cloned()))
}

/// Handler for a title's cast
pub async fn credits(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, u64)>,
) -> AppResult<Json<Vec<CastMember>>> {
    let media_type = parse_media_type(&media_type)?;
    Ok(Json(state.catalog.credits(id, media_type).await))
}

/// Handler for a title's reviews
pub async fn reviews(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, u64)>,
) -> AppResult<Json<Vec<Review>>> {
    let media_type = parse_media_type(&media_type)?;
    Ok(Json(state.catalog.reviews(id, media_type).await))
}
