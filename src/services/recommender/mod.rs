/// Synopsis-based recommendation models
///
/// Recommendations come from a pluggable model. The trained model runs as an
/// external script and may be missing, slow or broken; the local keyword model
/// always answers. Callers go through [`Recommender`], which tries the primary
/// model first and falls back to the local one on any failure.
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ModelOutput, RecommendationQuery, RecommendationResponse},
};

pub mod local;
pub mod script;

pub use local::LocalModel;
pub use script::ScriptModel;

/// Trait for recommendation models
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationModel: Send + Sync {
    /// Recommend catalog titles for a synopsis
    async fn recommend(&self, query: &RecommendationQuery) -> AppResult<ModelOutput>;

    /// Model name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Primary model with a transparent fallback
#[derive(Clone)]
pub struct Recommender {
    primary: Option<Arc<dyn RecommendationModel>>,
    fallback: Arc<dyn RecommendationModel>,
}

impl Recommender {
    pub fn new(
        primary: Option<Arc<dyn RecommendationModel>>,
        fallback: Arc<dyn RecommendationModel>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Runs the primary model when configured. Its failures are logged and
    /// answered by the fallback; they never reach the caller.
    pub async fn recommend(&self, query: &RecommendationQuery) -> AppResult<RecommendationResponse> {
        let output = match &self.primary {
            Some(primary) => match primary.recommend(query).await {
                Ok(output) => {
                    tracing::info!(model = primary.name(), cluster = output.cluster, "Recommendation model succeeded");
                    output
                }
                Err(e) => {
                    tracing::warn!(
                        model = primary.name(),
                        fallback = self.fallback.name(),
                        error = %e,
                        "Recommendation model failed, using fallback"
                    );
                    self.fallback.recommend(query).await?
                }
            },
            None => self.fallback.recommend(query).await?,
        };

        tracing::info!(
            cluster = output.cluster,
            confidence = output.confidence,
            recommendations = output.recommendations.len(),
            "Recommendations ready"
        );

        Ok(RecommendationResponse {
            recommendations: output.recommendations,
            cluster: output.cluster,
            method: query.method_label().to_string(),
            confidence: output.confidence,
            evidence: output.evidence,
            cluster_analysis: output.cluster_analysis,
        })
    }
}
