use std::num::IntErrorKind;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::Recommendation;

use super::AppState;

const DEFAULT_LIMIT: &str = "5";

// Request/Response types

/// Raw query parameters; parsed by hand so bad input gets a JSON error body
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub title: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub movies: usize,
    pub vocabulary: usize,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommend movies similar to `title`, falling back to suggestions on a miss
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<RecommendResponse>> {
    let limit = parse_limit(params.limit.as_deref(), state.max_limit)?;

    let title = params.title.as_deref().unwrap_or_default().trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput(
            "title query parameter is required".to_string(),
        ));
    }

    let recommender = state.recommender().await;
    let recommendations = recommender.recommend(title, limit)?;

    if recommendations.is_empty() {
        let suggestions = recommender.suggest_titles(title, state.suggestion_limit);
        tracing::info!(
            request_id = %request_id,
            title = %title,
            suggestion_count = suggestions.len(),
            "No recommendations found"
        );
        return Ok(Json(RecommendResponse {
            recommendations,
            suggestions: Some(suggestions),
        }));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        limit,
        result_count = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendResponse {
        recommendations,
        suggestions: None,
    }))
}

/// Rebuild the recommender from the configured dataset
pub async fn reload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ReloadResponse>> {
    tracing::info!(request_id = %request_id, "Reloading movie dataset");

    let recommender = state.reload().await?;
    let response = ReloadResponse {
        movies: recommender.movies().len(),
        vocabulary: recommender.corpus().vocabulary_size(),
    };

    tracing::info!(
        request_id = %request_id,
        movies = response.movies,
        vocabulary = response.vocabulary,
        "Reload completed"
    );

    Ok(Json(response))
}

/// Parses `limit` and clamps it into `[1, max]`, defaulting to 5
///
/// Integers too large for `i64` still clamp; only non-integers are rejected.
fn parse_limit(raw: Option<&str>, max: usize) -> AppResult<usize> {
    let max = max.max(1);
    let raw = raw.unwrap_or(DEFAULT_LIMIT).trim();
    match raw.parse::<i64>() {
        Ok(limit) => Ok(limit.clamp(1, max as i64) as usize),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(max),
            IntErrorKind::NegOverflow => Ok(1),
            _ => Err(AppError::InvalidInput(format!(
                "limit must be an integer between 1 and {}",
                max
            ))),
        },
    }
}
