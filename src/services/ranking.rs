use std::cmp::Ordering;

use crate::{
    models::{Intent, Movie, QueryAnalysis, RankedResult},
    services::{text::normalize, vocabulary::Vocabulary},
};

/// Maximum number of results returned by a search
pub const MAX_RESULTS: usize = 10;

/// Rating floor used instead of the query's own threshold once filters are relaxed
pub const RELAXED_RATING_FLOOR: f64 = 8.0;

/// Filters the catalog with the analysis, ranks the survivors and falls back
/// to a relaxed pass when nothing survives.
///
/// Never returns an empty list for a non-empty catalog.
pub fn rank(analysis: &QueryAnalysis, catalog: &[Movie], vocabulary: &Vocabulary) -> RankedResult {
    let mut matches = filter_candidates(analysis, catalog, vocabulary);

    if matches.is_empty() {
        return relax(analysis, catalog, vocabulary);
    }

    match analysis.intent {
        Intent::Ranking => sort_by_rating(&mut matches),
        _ => {
            let mut scored: Vec<(usize, &Movie)> = matches
                .into_iter()
                .map(|movie| (keyword_hits(&analysis.keywords, movie), movie))
                .collect();
            scored.sort_by(|(hits_a, a), (hits_b, b)| {
                hits_b.cmp(hits_a).then_with(|| by_rating_desc(a, b))
            });
            matches = scored.into_iter().map(|(_, movie)| movie).collect();
        }
    }

    RankedResult {
        movies: matches.into_iter().take(MAX_RESULTS).cloned().collect(),
        relaxed: false,
    }
}

/// Strict conjunction of every extracted filter plus the keyword check
fn filter_candidates<'a>(
    analysis: &QueryAnalysis,
    catalog: &'a [Movie],
    vocabulary: &Vocabulary,
) -> Vec<&'a Movie> {
    let filters = &analysis.filters;
    let aliases = filters.genre.as_deref().map(|g| vocabulary.aliases_for(g));
    let director = filters.director.as_deref().map(normalize);
    let actor = filters.actor.as_deref().map(normalize);

    catalog
        .iter()
        .filter(|m| aliases.as_ref().map_or(true, |a| matches_genre(m, a)))
        .filter(|m| filters.year.map_or(true, |range| range.contains(m.year)))
        .filter(|m| filters.rating.map_or(true, |floor| m.rating >= floor.min))
        .filter(|m| {
            director
                .as_ref()
                .map_or(true, |d| field_contains(m.director.as_deref(), d))
        })
        .filter(|m| {
            actor
                .as_ref()
                .map_or(true, |a| field_contains(m.cast.as_deref(), a))
        })
        .filter(|m| {
            analysis.keywords.is_empty()
                || contains_any(&normalize(&m.search_text()), &analysis.keywords)
        })
        .collect()
}

/// Fresh, looser pass over the whole catalog: aliased genre, the coarse
/// rating floor and keywords against titles and genres only. Drops to the
/// (optionally rating-floored) full catalog when even that is empty.
fn relax(analysis: &QueryAnalysis, catalog: &[Movie], vocabulary: &Vocabulary) -> RankedResult {
    let filters = &analysis.filters;
    let aliases = filters.genre.as_deref().map(|g| vocabulary.aliases_for(g));
    let floor = filters.rating.map(|_| RELAXED_RATING_FLOOR);

    let meets_floor = |m: &Movie| floor.map_or(true, |min| m.rating >= min);

    let mut fallback: Vec<&Movie> = catalog
        .iter()
        .filter(|m| aliases.as_ref().map_or(true, |a| matches_genre(m, a)))
        .filter(|m| meets_floor(m))
        .filter(|m| {
            analysis.keywords.is_empty()
                || contains_any(&normalize(&m.title_genre_text()), &analysis.keywords)
        })
        .collect();

    if fallback.is_empty() {
        fallback = catalog.iter().filter(|m| meets_floor(m)).collect();
    }
    if fallback.is_empty() {
        fallback = catalog.iter().collect();
    }

    sort_by_rating(&mut fallback);

    RankedResult {
        movies: fallback.into_iter().take(MAX_RESULTS).cloned().collect(),
        relaxed: true,
    }
}

fn matches_genre(movie: &Movie, aliases: &[String]) -> bool {
    let genre = normalize(&movie.genre);
    aliases.iter().any(|alias| genre.contains(alias.as_str()))
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| normalize(value).contains(needle))
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Number of query keywords found in the titles and synopsis
fn keyword_hits(keywords: &[String], movie: &Movie) -> usize {
    let text = normalize(&movie.relevance_text());
    keywords.iter().filter(|k| text.contains(k.as_str())).count()
}

fn by_rating_desc(a: &Movie, b: &Movie) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

fn sort_by_rating(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| by_rating_desc(a, b));
}
