use serde::{Deserialize, Serialize};

use super::Movie;

pub const DEFAULT_METHOD: &str = "tfidf";

/// Body of `POST /recommend`. Fields stay optional here so validation can
/// answer with a readable 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Validated recommendation input handed to a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationQuery {
    pub synopsis: String,
    pub method: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: Option<String>,
}

impl RecommendationQuery {
    /// Human-readable label for the requested method
    pub fn method_label(&self) -> &'static str {
        match self.method.as_str() {
            "tfidf" => "TF-IDF (Sinopses)",
            "method1" => "Seleção de Sinopse",
            "method2" => "Sinopse Personalizada",
            _ => "Todas as Features",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KeywordScore {
    pub cluster: u8,
    pub score: f64,
}

/// How a cluster was chosen for a synopsis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    pub processed_text: String,
    pub keyword_scores: Vec<KeywordScore>,
    pub selected_cluster: u8,
    pub confidence: f64,
    pub analysis_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepresentativeMovie {
    pub title: String,
    pub rating: f64,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YearStats {
    pub min: i32,
    pub max: i32,
    pub avg: f64,
}

/// Summary of the catalog entries sharing a cluster tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterAnalysis {
    pub cluster_id: u8,
    pub movie_count: usize,
    pub avg_rating: f64,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<YearStats>,
    pub representative_movies: Vec<RepresentativeMovie>,
}

/// What a recommendation model produces
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub recommendations: Vec<Movie>,
    pub cluster: u8,
    pub confidence: f64,
    pub evidence: Evidence,
    pub cluster_analysis: Option<ClusterAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Movie>,
    pub cluster: u8,
    pub method: String,
    pub confidence: f64,
    pub evidence: Evidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_analysis: Option<ClusterAnalysis>,
}

/// Ready-made synopsis offered to the client for method 1
#[derive(Debug, Clone, Serialize)]
pub struct SampleSynopsis {
    pub text: String,
    pub cluster: u8,
    pub genre: String,
    pub keywords: Vec<String>,
}
