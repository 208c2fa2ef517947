use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::RecommendedTitle,
    services::genai::GenAiClient,
};

/// Proposes candidate titles for a viewing request.
///
/// `exclude` lists titles already shown in the session; the backend is asked
/// to avoid them, but is not guaranteed to comply — the pipeline re-filters
/// by catalog identity regardless.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TitleGenerator: Send + Sync {
    async fn generate(
        &self,
        user_input: &str,
        exclude: &[String],
    ) -> AppResult<Vec<RecommendedTitle>>;
}

/// Expected reply shape from the backend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationReply {
    media_recommendations: Vec<RecommendedTitle>,
}

/// Generator backed by the generative-text backend
pub struct GenAiGenerator {
    client: Arc<GenAiClient>,
}

impl GenAiGenerator {
    pub fn new(client: Arc<GenAiClient>) -> Self {
        Self { client }
    }

    fn build_prompt(user_input: &str, exclude: &[String]) -> String {
        let mut prompt = format!(
            "You recommend movies and TV series.\n\
             Suggest up to 10 titles matching the request below. Reply with JSON only, \
             in the shape {{\"mediaRecommendations\": [{{\"title\": \"...\", \
             \"type\": \"movie\" or \"tv\"}}]}}. \
             Use an empty list when nothing fits.\n\n\
             Request: {user_input}"
        );

        if !exclude.is_empty() {
            prompt.push_str("\n\nDo not suggest any of these titles again: ");
            prompt.push_str(&exclude.join(", "));
        }

        prompt
    }
}

#[async_trait]
impl TitleGenerator for GenAiGenerator {
    async fn generate(
        &self,
        user_input: &str,
        exclude: &[String],
    ) -> AppResult<Vec<RecommendedTitle>> {
        let reply: GenerationReply = self
            .client
            .generate_json(&Self::build_prompt(user_input, exclude))
            .await?;

        tracing::debug!(
            candidates = reply.media_recommendations.len(),
            excluded = exclude.len(),
            "Titles generated"
        );

        Ok(reply.media_recommendations)
    }
}
