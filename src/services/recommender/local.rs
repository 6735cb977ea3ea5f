use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ModelOutput, RecommendationQuery},
    services::{
        analyzer::analyze_query,
        catalog::Catalog,
        ranking::rank,
        recommender::RecommendationModel,
        synopsis::{analyze_cluster, cluster_recommendations, score_synopsis, CLUSTER_RECOMMENDATIONS},
        vocabulary::Vocabulary,
    },
};

/// Keyword-scoring model over the in-memory catalog
///
/// Deterministic and dependency-free, so it doubles as the fallback for the
/// script-backed model.
#[derive(Clone)]
pub struct LocalModel {
    catalog: Catalog,
    vocabulary: Arc<Vocabulary>,
}

impl LocalModel {
    pub fn new(catalog: Catalog, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            catalog,
            vocabulary,
        }
    }
}

#[async_trait::async_trait]
impl RecommendationModel for LocalModel {
    async fn recommend(&self, query: &RecommendationQuery) -> AppResult<ModelOutput> {
        let score = score_synopsis(&query.synopsis, &self.vocabulary);

        let mut recommendations = cluster_recommendations(&self.catalog, score.cluster);
        if recommendations.is_empty() {
            // Nothing carries the cluster tag: search with the synopsis instead
            tracing::debug!(cluster = score.cluster, "Cluster has no titles, ranking by synopsis");
            let analysis = analyze_query(&query.synopsis, &self.vocabulary);
            recommendations = rank(&analysis, self.catalog.movies(), &self.vocabulary).movies;
            recommendations.truncate(CLUSTER_RECOMMENDATIONS);
        }

        Ok(ModelOutput {
            recommendations,
            cluster: score.cluster,
            confidence: score.confidence,
            cluster_analysis: analyze_cluster(&self.catalog, score.cluster),
            evidence: score.evidence,
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
