use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    models::{Intent, QueryAnalysis, QueryFilters, RatingFloor, SearchType, YearRange},
    services::{
        text::{normalize, tokenize},
        vocabulary::Vocabulary,
    },
};

/// Minimum rating requested by superlatives ("melhores", "top", ...)
pub const SUPERLATIVE_RATING: f64 = 8.5;

/// Half-width of the window around a single year mentioned in a query
const YEAR_TOLERANCE: i32 = 2;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("valid regex"));

static DIRECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:diretora?|director|dirigido por|directed by)\b[:\s]+([^,]+)")
        .expect("valid regex")
});

static ACTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:atriz|ator|actress|actor|starring|estrelad[oa]s? por)\b[:\s]+([^,]+)")
        .expect("valid regex")
});

/// Turns a free-text query into intent, keywords and filters.
///
/// Total and deterministic: any input, including an empty or
/// punctuation-only string, yields a well-formed analysis.
pub fn analyze_query(query: &str, vocabulary: &Vocabulary) -> QueryAnalysis {
    let normalized = normalize(query);

    let intent = classify_intent(&normalized, vocabulary);
    let filters = extract_filters(&normalized, vocabulary);
    let keywords = extract_keywords(&normalized, vocabulary, filters.genre.as_deref());

    let search_type = match intent {
        Intent::Recommendation => SearchType::Recommendation,
        _ if keywords.len() == 1 && keywords[0].chars().count() > 3 => SearchType::Exact,
        _ => SearchType::Semantic,
    };

    QueryAnalysis {
        intent,
        keywords,
        filters,
        search_type,
    }
}

/// First matching rule wins: recommendation, then ranking, then plain search
fn classify_intent(normalized: &str, vocabulary: &Vocabulary) -> Intent {
    let mentions = |terms: &[String]| terms.iter().any(|t| normalized.contains(t.as_str()));

    if mentions(&vocabulary.recommendation_terms) {
        Intent::Recommendation
    } else if mentions(&vocabulary.ranking_terms) {
        Intent::Ranking
    } else {
        Intent::Search
    }
}

fn extract_filters(normalized: &str, vocabulary: &Vocabulary) -> QueryFilters {
    let genre = vocabulary
        .genres
        .iter()
        .find(|g| g.triggers.iter().any(|t| normalized.contains(t.as_str())))
        .map(|g| g.genre.clone());

    let rating = vocabulary
        .superlative_terms
        .iter()
        .any(|t| normalized.contains(t.as_str()))
        .then_some(RatingFloor {
            min: SUPERLATIVE_RATING,
        });

    QueryFilters {
        genre,
        year: extract_year_range(normalized),
        rating,
        director: capture_person(&DIRECTOR, normalized),
        actor: capture_person(&ACTOR, normalized),
    }
}

/// One year widens to a tolerance window; several years span min..=max of
/// all of them.
fn extract_year_range(normalized: &str) -> Option<YearRange> {
    let years: Vec<i32> = YEAR
        .find_iter(normalized)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match years.as_slice() {
        [] => None,
        [year] => Some(YearRange {
            min: year - YEAR_TOLERANCE,
            max: year + YEAR_TOLERANCE,
        }),
        _ => Some(YearRange {
            min: *years.iter().min()?,
            max: *years.iter().max()?,
        }),
    }
}

fn capture_person(pattern: &Regex, normalized: &str) -> Option<String> {
    pattern
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Keywords are what remains after filter extraction has taken its share:
/// director/actor clauses, year numbers, intent/superlative stems and the
/// trigger words of the selected genre are not repeated as free-text terms.
fn extract_keywords(normalized: &str, vocabulary: &Vocabulary, genre: Option<&str>) -> Vec<String> {
    let residual = DIRECTOR.replace_all(normalized, " ");
    let residual = ACTOR.replace_all(&residual, " ");

    let genre_triggers: &[String] = vocabulary
        .genres
        .iter()
        .find(|g| Some(g.genre.as_str()) == genre)
        .map(|g| g.triggers.as_slice())
        .unwrap_or_default();

    tokenize(&residual)
        .into_iter()
        .filter(|token| !vocabulary.is_stop_word(token))
        .filter(|token| !is_year(token))
        .filter(|token| !vocabulary.is_signal(token))
        .filter(|token| !genre_triggers.iter().any(|t| token.contains(t.as_str())))
        .collect()
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(query: &str) -> QueryAnalysis {
        analyze_query(query, &Vocabulary::default())
    }

    #[test]
    fn test_empty_query() {
        let analysis = analyze("");
        assert_eq!(analysis.intent, Intent::Search);
        assert!(analysis.keywords.is_empty());
        assert!(analysis.filters.is_empty());
        assert_eq!(analysis.search_type, SearchType::Semantic);
    }

    #[test]
    fn test_punctuation_only_query() {
        let analysis = analyze("?!... ,,;");
        assert_eq!(analysis.intent, Intent::Search);
        assert!(analysis.keywords.is_empty());
        assert!(analysis.filters.is_empty());
    }

    #[test]
    fn test_intent_priority() {
        assert_eq!(
            analyze("recomende os melhores filmes").intent,
            Intent::Recommendation
        );
        assert_eq!(analyze("top 10 de todos os tempos").intent, Intent::Ranking);
        assert_eq!(analyze("batman coringa").intent, Intent::Search);
        assert_eq!(analyze("Suggest something").intent, Intent::Recommendation);
        assert_eq!(
            analyze("me indica um filme de ação").intent,
            Intent::Recommendation
        );
    }

    #[test]
    fn test_words_sharing_a_signal_prefix_stay_keywords() {
        let analysis = analyze("highlander");
        assert_eq!(analysis.keywords, vec!["highlander"]);
        assert_eq!(analysis.search_type, SearchType::Exact);

        let analysis = analyze("o topázio e o bestiário");
        assert_eq!(analysis.keywords, vec!["topazio", "bestiario"]);
    }

    #[test]
    fn test_inflected_signals_are_consumed() {
        let analysis = analyze("me indica as melhores sugestões de ranking");
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_best_of_decade() {
        let analysis = analyze("melhores filmes de 1990 a 2000");
        assert_eq!(analysis.intent, Intent::Ranking);
        assert_eq!(analysis.filters.year, Some(YearRange { min: 1990, max: 2000 }));
        assert_eq!(analysis.filters.rating, Some(RatingFloor { min: 8.5 }));
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_single_year_window() {
        let analysis = analyze("filmes de 1994");
        assert_eq!(analysis.filters.year, Some(YearRange { min: 1992, max: 1996 }));
    }

    #[test]
    fn test_many_years_use_min_and_max() {
        let analysis = analyze("entre 2001, 1972 e 1994");
        assert_eq!(analysis.filters.year, Some(YearRange { min: 1972, max: 2001 }));
    }

    #[test]
    fn test_director_clause() {
        let analysis = analyze("filmes do diretor Christopher Nolan");
        assert_eq!(analysis.filters.director.as_deref(), Some("christopher nolan"));
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_director_stops_at_comma() {
        let analysis = analyze("director: Peter Jackson, aventura");
        assert_eq!(analysis.filters.director.as_deref(), Some("peter jackson"));
        assert_eq!(analysis.filters.genre.as_deref(), Some("action"));
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_actor_clause() {
        let analysis = analyze("Filmes estrelados por Morgan Freeman");
        assert_eq!(analysis.filters.actor.as_deref(), Some("morgan freeman"));

        let analysis = analyze("starring: Al Pacino");
        assert_eq!(analysis.filters.actor.as_deref(), Some("al pacino"));
    }

    #[test]
    fn test_actor_marker_needs_whole_word() {
        let analysis = analyze("gladiator 2000");
        assert!(analysis.filters.actor.is_none());
    }

    #[test]
    fn test_genre_uses_first_table_match() {
        // "drama" precedes "crime" in the trigger table
        let analysis = analyze("drama sobre a máfia");
        assert_eq!(analysis.filters.genre.as_deref(), Some("drama"));
        assert_eq!(analysis.keywords, vec!["mafia"]);
    }

    #[test]
    fn test_genre_matches_without_accents() {
        assert_eq!(
            analyze("Recomendações de filmes de ação").filters.genre.as_deref(),
            Some("action")
        );
        assert_eq!(analyze("ficção científica").filters.genre.as_deref(), Some("sci-fi"));
    }

    #[test]
    fn test_keywords_preserve_order_and_duplicates() {
        let analysis = analyze("guerra e paz, guerra fria");
        assert_eq!(analysis.keywords, vec!["guerra", "paz", "guerra", "fria"]);
        assert_eq!(analysis.search_type, SearchType::Semantic);
    }

    #[test]
    fn test_exact_search_type() {
        assert_eq!(analyze("Gandalf").search_type, SearchType::Exact);
        assert_eq!(analyze("sam").search_type, SearchType::Semantic);
        assert_eq!(
            analyze("sugestões com gandalf").search_type,
            SearchType::Recommendation
        );
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let query = "Melhores dramas de 1994 com rating alto, diretor: Frank Darabont";
        assert_eq!(analyze(query), analyze(query));
    }

    #[test]
    fn test_diacritic_insensitive() {
        assert_eq!(analyze("ação"), analyze("acao"));
    }
}
