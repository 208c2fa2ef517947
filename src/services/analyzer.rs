use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{error::AppResult, models::AnalyzedInput, services::genai::GenAiClient};

/// Extracts genres and other context clues from the raw user input.
///
/// Runs once per recommendation session, on the first page only; the
/// analysis stays valid for every "load more" continuation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InputAnalyzer: Send + Sync {
    async fn analyze(&self, user_input: &str) -> AppResult<AnalyzedInput>;
}

/// Analyzer backed by the generative-text backend
pub struct GenAiAnalyzer {
    client: Arc<GenAiClient>,
}

impl GenAiAnalyzer {
    pub fn new(client: Arc<GenAiClient>) -> Self {
        Self { client }
    }

    fn build_prompt(user_input: &str) -> String {
        format!(
            "You analyze a viewing request for movie and TV recommendations.\n\
             Identify relevant genres and any other context clues in the user's input. \
             Implicit preferences count: \"something with a lot of suspense\" implies Thriller. \
             Order genres by relevance.\n\
             Reply with JSON only, in the shape \
             {{\"relevantGenres\": [\"...\"], \"otherContextClues\": \"...\"}}. \
             Use the literal string \"none\" for otherContextClues when there are no clues \
             beyond the genres.\n\n\
             User input: {user_input}"
        )
    }
}

#[async_trait]
impl InputAnalyzer for GenAiAnalyzer {
    async fn analyze(&self, user_input: &str) -> AppResult<AnalyzedInput> {
        let analysis: AnalyzedInput = self
            .client
            .generate_json(&Self::build_prompt(user_input))
            .await?;

        tracing::debug!(
            genres = analysis.relevant_genres.len(),
            has_clues = analysis.context_clues().is_some(),
            "User input analyzed"
        );

        Ok(analysis)
    }
}
