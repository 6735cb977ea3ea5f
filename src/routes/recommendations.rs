use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        RecommendationQuery, RecommendationRequest, RecommendationResponse, SampleSynopsis,
        DEFAULT_METHOD,
    },
    routes::AppState,
    services::synopsis::sample_synopses,
};

#[derive(Debug, Serialize)]
pub struct SamplesResponse {
    pub synopses: Vec<SampleSynopsis>,
    pub method: &'static str,
    pub description: &'static str,
}

/// Handler for synopsis-based recommendations
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    let synopsis = request
        .synopsis
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Sinopse é obrigatória".to_string()))?;

    let query = RecommendationQuery {
        synopsis,
        method: request.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        year: request.year,
        rating: request.rating,
        genre: request.genre,
    };

    tracing::info!(
        request_id = %request_id,
        method = %query.method,
        synopsis_chars = query.synopsis.chars().count(),
        "Processing recommendation request"
    );

    let response = state.recommender.recommend(&query).await?;
    Ok(Json(response))
}

/// Sample synopses offered for the first recommendation method
pub async fn samples(State(state): State<Arc<AppState>>) -> Json<SamplesResponse> {
    Json(SamplesResponse {
        synopses: sample_synopses(&state.catalog, &state.vocabulary),
        method: "method1",
        description: "Sinopses para seleção no Método 1",
    })
}
