use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        catalog::Catalog, posters::PosterService, recommender::Recommender,
        vocabulary::Vocabulary,
    },
};

pub mod movies;
pub mod recommendations;
pub mod search;
pub mod synopsis;

/// Shared, read-mostly application state
pub struct AppState {
    pub catalog: Catalog,
    pub vocabulary: Arc<Vocabulary>,
    pub recommender: Recommender,
    pub posters: PosterService,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai-search", post(search::search).get(search::usage))
        .route(
            "/recommend",
            post(recommendations::recommend).get(recommendations::samples),
        )
        .route("/movies", get(movies::list))
        .route("/enhance-synopsis", post(synopsis::enhance))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
