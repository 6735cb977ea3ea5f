use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{EnhanceRequest, EnhanceResponse},
};

pub const LOCAL_TEMPLATE: &str = "local_template";

const CLOSING: &str = "Uma experiência visual e emocional que cativa o público.";

fn template_for(genre: &str) -> &'static str {
    match genre {
        "Drama" => "Uma narrativa dramática envolvente",
        "Action" => "Uma aventura repleta de ação",
        "Comedy" => "Uma comédia que diverte",
        "Thriller" => "Um thriller que prende",
        "Sci-Fi" => "Uma visão fascinante do futuro",
        _ => "Uma história cinematográfica",
    }
}

/// Rewrites a synopsis with a genre-specific opening
pub fn enhance_synopsis(request: EnhanceRequest) -> AppResult<EnhanceResponse> {
    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Título é obrigatório".to_string()))?;
    let synopsis = request
        .synopsis
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Sinopse é obrigatória".to_string()))?;
    let genre = request.genre.unwrap_or_default();

    tracing::debug!(
        title = %title,
        year = ?request.year,
        genre = %genre,
        style = request.style.as_deref().unwrap_or("cinematic"),
        "Enhancing synopsis"
    );

    Ok(EnhanceResponse {
        enhanced_synopsis: format!("{}: {synopsis}. {CLOSING}", template_for(genre.trim())),
        method: LOCAL_TEMPLATE.to_string(),
        timestamp: Utc::now().timestamp_millis(),
        original_synopsis: synopsis,
    })
}
