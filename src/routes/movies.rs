use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{middleware::request_id::RequestId, models::Movie, routes::AppState};

/// Handler for the catalog listing
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Vec<Movie>> {
    let movies = state.posters.enrich(state.catalog.movies()).await;

    tracing::info!(
        request_id = %request_id,
        movies = movies.len(),
        "Catalog listed with posters"
    );

    Json(movies)
}
