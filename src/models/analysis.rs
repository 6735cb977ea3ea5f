use serde::{Deserialize, Serialize};

use super::Movie;

/// Coarse classification of what a free-text query asks for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Recommendation,
    Ranking,
}

/// How the query terms should be interpreted by the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Semantic,
    Exact,
    Recommendation,
}

/// Inclusive release-year window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatingFloor {
    pub min: f64,
}

/// Filters extracted from a query. Every field is optional and absent
/// fields are left out of the serialized form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<YearRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingFloor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.director.is_none()
            && self.actor.is_none()
    }
}

/// Structured form of a free-text query, rebuilt for every request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryAnalysis {
    pub intent: Intent,
    /// Normalized tokens in query order; duplicates are kept
    pub keywords: Vec<String>,
    pub filters: QueryFilters,
    pub search_type: SearchType,
}

/// Ordered search results and whether filters had to be relaxed
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub movies: Vec<Movie>,
    pub relaxed: bool,
}
