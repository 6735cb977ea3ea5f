use crate::models::{Intent, Movie, QueryAnalysis};

/// Number of titles described in detail
const DETAILED_RESULTS: usize = 5;

const SYNOPSIS_PREVIEW_CHARS: usize = 100;

/// Renders search results as a short Portuguese summary
pub fn natural_response(results: &[Movie], analysis: &QueryAnalysis) -> String {
    if results.is_empty() {
        return "Desculpe, não encontrei filmes que correspondam à sua pesquisa. Tente usar \
                termos diferentes ou ser mais específico sobre o que você está procurando."
            .to_string();
    }

    let count = results.len();
    let mut response = match analysis.intent {
        Intent::Recommendation => format!(
            "Baseado na sua consulta, encontrei {count} filmes que podem te interessar:\n\n"
        ),
        Intent::Ranking => {
            "Aqui estão os melhores filmes que correspondem à sua pesquisa:\n\n".to_string()
        }
        Intent::Search => format!("Encontrei {count} filmes relacionados à sua pesquisa:\n\n"),
    };

    for (index, movie) in results.iter().take(DETAILED_RESULTS).enumerate() {
        let preview: String = movie.synopsis.chars().take(SYNOPSIS_PREVIEW_CHARS).collect();
        response.push_str(&format!(
            "{}. **{}** ({})\n   - Gênero: {}\n   - Diretor: {}\n   - Rating: {}/10\n   - Sinopse: {}...\n\n",
            index + 1,
            movie.display_title(),
            movie.year,
            movie.genre,
            movie.director.as_deref().unwrap_or("Desconhecido"),
            movie.rating,
            preview,
        ));
    }

    if count > DETAILED_RESULTS {
        response.push_str(&format!("E mais {} filmes...", count - DETAILED_RESULTS));
    }

    let filters = &analysis.filters;
    if let Some(genre) = &filters.genre {
        response.push_str(&format!(
            "\n\n**Insight:** Filtrei por filmes do gênero {genre}."
        ));
    }
    if let Some(year) = filters.year {
        response.push_str(&format!(
            "\n\n**Insight:** Foquei em filmes do período {}-{}.",
            year.min, year.max
        ));
    }
    if let Some(rating) = filters.rating {
        response.push_str(&format!(
            "\n\n**Insight:** Priorizei filmes com rating alto ({}+).",
            rating.min
        ));
    }

    response
}
