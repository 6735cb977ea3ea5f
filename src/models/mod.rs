use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod movie;
pub mod recommendation;

pub use analysis::{
    Intent, QueryAnalysis, QueryFilters, RankedResult, RatingFloor, SearchType, YearRange,
};
pub use movie::Movie;
pub use recommendation::{
    ClusterAnalysis, Evidence, KeywordScore, ModelOutput, RecommendationQuery,
    RecommendationRequest, RecommendationResponse, RepresentativeMovie, SampleSynopsis,
    YearStats, DEFAULT_METHOD,
};

// ============================================================================
// AI Search Types
// ============================================================================

/// Body of `POST /ai-search`
///
/// `query` is kept as a raw JSON value so a missing or non-string query can be
/// reported as a client error with a readable message.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<serde_json::Value>,
}

/// Debug view of how a query was interpreted
#[derive(Debug, Serialize)]
pub struct SearchAnalysis {
    pub original_query: String,
    pub detected_intent: Intent,
    pub extracted_keywords: Vec<String>,
    pub applied_filters: QueryFilters,
    pub search_type: SearchType,
    pub relaxed_filters: bool,
    pub results_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Movie>,
    pub natural_response: String,
    pub analysis: SearchAnalysis,
    pub timestamp: DateTime<Utc>,
}

/// Static description returned by the `GET` side of an endpoint
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub message: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub examples: Vec<&'static str>,
}

// ============================================================================
// Synopsis Enhancement Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EnhanceResponse {
    pub enhanced_synopsis: String,
    pub method: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub original_synopsis: String,
}
