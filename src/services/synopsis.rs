use std::collections::BTreeSet;

use crate::{
    models::{
        ClusterAnalysis, Evidence, KeywordScore, Movie, RepresentativeMovie, SampleSynopsis,
        YearStats,
    },
    services::{
        catalog::Catalog,
        text::{normalize, tokenize},
        vocabulary::Vocabulary,
    },
};

/// Method name reported in the evidence of the local model
pub const KEYWORD_ANALYSIS: &str = "keyword_analysis";

/// Number of titles recommended for a cluster
pub const CLUSTER_RECOMMENDATIONS: usize = 5;

const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.9;

/// Outcome of scoring a synopsis against the cluster keyword table
#[derive(Debug, Clone, PartialEq)]
pub struct SynopsisScore {
    pub cluster: u8,
    /// Confidence reported to clients, never below 0.3
    pub confidence: f64,
    pub evidence: Evidence,
}

/// Picks the cluster whose keywords appear most often in the synopsis.
///
/// Ties keep the earliest cluster in the table; a synopsis with no hits
/// lands in the first cluster with the minimum confidence.
pub fn score_synopsis(synopsis: &str, vocabulary: &Vocabulary) -> SynopsisScore {
    let processed_text = tokenize(&normalize(synopsis)).join(" ");

    let scores: Vec<KeywordScore> = vocabulary
        .cluster_keywords
        .iter()
        .map(|entry| KeywordScore {
            cluster: entry.cluster,
            score: entry
                .keywords
                .iter()
                .filter(|k| processed_text.contains(k.as_str()))
                .count() as f64,
        })
        .collect();

    let mut cluster = scores.first().map(|s| s.cluster).unwrap_or_default();
    let mut best = 0.0;
    for score in &scores {
        if score.score > best {
            best = score.score;
            cluster = score.cluster;
        }
    }

    let mut ranked: Vec<f64> = scores.iter().map(|s| s.score).collect();
    ranked.sort_by(|a, b| b.total_cmp(a));
    let top = ranked.first().copied().unwrap_or_default();
    let second = ranked.get(1).copied().unwrap_or_default();

    let raw_confidence = if top > 0.0 {
        (top / (top + second + 1.0)).min(MAX_CONFIDENCE)
    } else {
        MIN_CONFIDENCE
    };

    SynopsisScore {
        cluster,
        confidence: raw_confidence.max(MIN_CONFIDENCE),
        evidence: Evidence {
            processed_text,
            keyword_scores: scores,
            selected_cluster: cluster,
            confidence: raw_confidence,
            analysis_method: KEYWORD_ANALYSIS.to_string(),
        },
    }
}

/// Highest rated titles of a cluster
pub fn cluster_recommendations(catalog: &Catalog, cluster: u8) -> Vec<Movie> {
    let mut movies: Vec<&Movie> = catalog.in_cluster(cluster).collect();
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    movies
        .into_iter()
        .take(CLUSTER_RECOMMENDATIONS)
        .cloned()
        .collect()
}

/// Summary of a cluster, or `None` when no catalog entry carries the tag
pub fn analyze_cluster(catalog: &Catalog, cluster: u8) -> Option<ClusterAnalysis> {
    let movies: Vec<&Movie> = catalog.in_cluster(cluster).collect();
    if movies.is_empty() {
        return None;
    }

    let count = movies.len() as f64;
    let avg_rating = movies.iter().map(|m| m.rating).sum::<f64>() / count;
    let avg_year = movies.iter().map(|m| f64::from(m.year)).sum::<f64>() / count;

    let mut seen = BTreeSet::new();
    let genres = movies
        .iter()
        .map(|m| m.primary_genre().to_string())
        .filter(|genre| seen.insert(genre.clone()))
        .collect();

    Some(ClusterAnalysis {
        cluster_id: cluster,
        movie_count: movies.len(),
        avg_rating,
        genres,
        years: Some(YearStats {
            min: movies.iter().map(|m| m.year).min()?,
            max: movies.iter().map(|m| m.year).max()?,
            avg: avg_year,
        }),
        representative_movies: movies
            .iter()
            .take(3)
            .map(|m| RepresentativeMovie {
                title: m.display_title().to_string(),
                rating: m.rating,
                year: m.year,
            })
            .collect(),
    })
}

/// Synopses offered for selection in the first recommendation method
pub fn sample_synopses(catalog: &Catalog, vocabulary: &Vocabulary) -> Vec<SampleSynopsis> {
    vocabulary
        .cluster_keywords
        .iter()
        .filter_map(|entry| {
            let movie = catalog.in_cluster(entry.cluster).next()?;
            Some(SampleSynopsis {
                text: movie.synopsis.clone(),
                cluster: entry.cluster,
                genre: movie.genre.clone(),
                keywords: entry.keywords.iter().take(4).cloned().collect(),
            })
        })
        .collect()
}
