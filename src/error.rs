use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Please enter a description of what you want to watch.")]
    EmptyInput,

    #[error("Recommendation service failed: {0}")]
    GenAi(String),

    #[error("Could not generate recommendations. Try a different query.")]
    NoRecommendations,

    #[error("Recommendations were found, but none matched the catalog. Try a more specific query.")]
    NoMatchesInCatalog,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NoRecommendations => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::NoMatchesInCatalog => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::GenAi(_) | AppError::HttpClient(_) | AppError::Catalog(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Cache(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
