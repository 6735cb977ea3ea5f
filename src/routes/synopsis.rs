use axum::{extract::rejection::JsonRejection, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{EnhanceRequest, EnhanceResponse},
    services::enhancer::enhance_synopsis,
};

/// Handler for synopsis enhancement
pub async fn enhance(
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<EnhanceRequest>, JsonRejection>,
) -> AppResult<Json<EnhanceResponse>> {
    let Json(request) = payload?;
    let response = enhance_synopsis(request)?;

    tracing::info!(
        request_id = %request_id,
        method = %response.method,
        "Synopsis enhanced"
    );

    Ok(Json(response))
}
