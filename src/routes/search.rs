use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{SearchAnalysis, SearchRequest, SearchResponse, UsageResponse},
    routes::AppState,
    services::{analyzer::analyze_query, narrative::natural_response, ranking::rank},
};

/// Handler for the free-text search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Json(request) = payload?;
    let query = match request.query {
        Some(serde_json::Value::String(query)) => query,
        _ => {
            return Err(AppError::InvalidInput(
                "Query é obrigatória e deve ser uma string".to_string(),
            ))
        }
    };

    let analysis = analyze_query(&query, &state.vocabulary);
    tracing::info!(
        request_id = %request_id,
        intent = ?analysis.intent,
        keywords = ?analysis.keywords,
        search_type = ?analysis.search_type,
        "Analyzed search query"
    );

    let ranked = rank(&analysis, state.catalog.movies(), &state.vocabulary);
    let natural_response = natural_response(&ranked.movies, &analysis);

    tracing::info!(
        request_id = %request_id,
        results = ranked.movies.len(),
        relaxed = ranked.relaxed,
        "Search completed"
    );

    Ok(Json(SearchResponse {
        analysis: SearchAnalysis {
            original_query: query.clone(),
            detected_intent: analysis.intent,
            extracted_keywords: analysis.keywords,
            applied_filters: analysis.filters,
            search_type: analysis.search_type,
            relaxed_filters: ranked.relaxed,
            results_count: ranked.movies.len(),
        },
        query,
        results: ranked.movies,
        natural_response,
        timestamp: Utc::now(),
    }))
}

/// Usage description for the search endpoint
pub async fn usage() -> Json<UsageResponse> {
    Json(UsageResponse {
        message: "API de Busca IA - FiapFlix",
        description: "Endpoint para busca inteligente de filmes usando IA generativa",
        usage: r#"POST com { "query": "sua pergunta sobre filmes" }"#,
        examples: vec![
            "Filmes de drama com rating alto",
            "Melhores filmes de 1990 a 2000",
            "Filmes do diretor Christopher Nolan",
            "Recomendações de filmes de ação",
            "Filmes estrelados por Morgan Freeman",
        ],
    })
}
