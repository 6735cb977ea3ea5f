/// Trained-model recommendations served by an external script
///
/// Invocation: `<interpreter> <script> <json>` where json carries the synopsis,
/// method and the year/rating/genre hints. The script prints a JSON object on
/// stdout with `recommendations`, `cluster`, `confidence` and optionally
/// `cluster_analysis`, or an `error` field together with a non-zero exit.
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ClusterAnalysis, Evidence, ModelOutput, Movie, RecommendationQuery},
    services::{recommender::RecommendationModel, synopsis::score_synopsis, vocabulary::Vocabulary},
};

const DEFAULT_YEAR: i32 = 2000;
const DEFAULT_RATING: f64 = 8.0;
const DEFAULT_GENRE: &str = "Drama";

/// Characters of the synopsis echoed back in the evidence
const PROCESSED_TEXT_PREVIEW: usize = 200;

/// Raw script output
#[derive(Debug, Deserialize)]
struct ScriptOutput {
    #[serde(default)]
    recommendations: Vec<Movie>,
    #[serde(default)]
    cluster: Option<u8>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    evidence: Option<Evidence>,
    #[serde(default)]
    cluster_analysis: Option<ClusterAnalysis>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct ScriptModel {
    interpreter: String,
    script: PathBuf,
    timeout: Duration,
    vocabulary: Arc<Vocabulary>,
}

impl ScriptModel {
    pub fn new(
        interpreter: impl Into<String>,
        script: impl Into<PathBuf>,
        timeout: Duration,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
            timeout,
            vocabulary,
        }
    }

    /// Builds the model when a script is configured and present on disk
    pub fn from_config(config: &Config, vocabulary: Arc<Vocabulary>) -> Option<Self> {
        let script = config.model_script_path.as_deref()?;

        if !Path::new(script).exists() {
            tracing::warn!(script, "Model script not found, using local recommendations only");
            return None;
        }

        tracing::info!(
            script,
            interpreter = %config.model_interpreter,
            timeout_secs = config.model_timeout_secs,
            "Script recommendation model enabled"
        );

        Some(Self::new(
            config.model_interpreter.clone(),
            script,
            Duration::from_secs(config.model_timeout_secs),
            vocabulary,
        ))
    }

    async fn run(&self, query: &RecommendationQuery) -> AppResult<ScriptOutput> {
        let payload = json!({
            "synopsis": query.synopsis,
            "method": query.method,
            "year": query.year.unwrap_or(DEFAULT_YEAR),
            "rating": query.rating.unwrap_or(DEFAULT_RATING),
            "genre": query.genre.as_deref().unwrap_or(DEFAULT_GENRE),
        });

        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script)
            .arg(payload.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| AppError::Model(format!("timed out after {:?}", self.timeout)))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(AppError::Model(format!(
                "script exited with {}: {}",
                output.status,
                if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() }
            )));
        }

        let parsed: ScriptOutput = serde_json::from_slice(&output.stdout)?;
        Ok(parsed)
    }

    fn evidence_for(&self, query: &RecommendationQuery, cluster: u8, confidence: f64) -> Evidence {
        let preview: String = query.synopsis.chars().take(PROCESSED_TEXT_PREVIEW).collect();
        let analysis_method = match query.method.as_str() {
            "tfidf" => "Análise de Texto (TF-IDF)",
            _ => "Análise Multidimensional",
        };

        Evidence {
            processed_text: format!("{preview}..."),
            keyword_scores: score_synopsis(&query.synopsis, &self.vocabulary)
                .evidence
                .keyword_scores,
            selected_cluster: cluster,
            confidence,
            analysis_method: analysis_method.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationModel for ScriptModel {
    async fn recommend(&self, query: &RecommendationQuery) -> AppResult<ModelOutput> {
        let output = self.run(query).await?;

        if let Some(error) = output.error {
            return Err(AppError::Model(error));
        }
        if output.recommendations.is_empty() {
            return Err(AppError::Model("script returned no recommendations".to_string()));
        }
        let cluster = output
            .cluster
            .ok_or_else(|| AppError::Model("script returned no cluster".to_string()))?;
        let confidence = output.confidence.unwrap_or_default();

        Ok(ModelOutput {
            evidence: output
                .evidence
                .unwrap_or_else(|| self.evidence_for(query, cluster, confidence)),
            recommendations: output.recommendations,
            cluster,
            confidence,
            cluster_analysis: output.cluster_analysis,
        })
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_METHOD;
    use std::io::Write;

    fn query() -> RecommendationQuery {
        RecommendationQuery {
            synopsis: "Um banqueiro condenado forma uma amizade na prisão".to_string(),
            method: DEFAULT_METHOD.to_string(),
            year: None,
            rating: None,
            genre: None,
        }
    }

    fn shell_model(body: &str, timeout: Duration) -> (tempfile::TempDir, ScriptModel) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{body}").unwrap();

        let model = ScriptModel::new("sh", path, timeout, Arc::new(Vocabulary::default()));
        (dir, model)
    }

    #[tokio::test]
    async fn test_successful_script() {
        let (_dir, model) = shell_model(
            r#"cat <<'EOF'
{"recommendations": [{"id": "1", "rank": 1, "title_en": "The Shawshank Redemption",
  "year": 1994, "rating": 9.3, "genre": "Drama", "sinopse": "Prisão."}],
 "cluster": 1, "confidence": 0.82}
EOF"#,
            Duration::from_secs(5),
        );

        let output = model.recommend(&query()).await.unwrap();
        assert_eq!(output.cluster, 1);
        assert_eq!(output.recommendations.len(), 1);
        assert!((output.confidence - 0.82).abs() < 1e-9);
        assert_eq!(output.evidence.analysis_method, "Análise de Texto (TF-IDF)");
        assert_eq!(output.evidence.selected_cluster, 1);
    }

    #[tokio::test]
    async fn test_script_receives_payload() {
        // Echo the synopsis back as the error message to inspect the argument
        let (_dir, model) = shell_model(
            r#"printf '{"error": "%s"}' "$(echo "$1" | sed 's/"/_/g')""#,
            Duration::from_secs(5),
        );

        match model.recommend(&query()).await {
            Err(AppError::Model(message)) => {
                assert!(message.contains("_synopsis_"));
                assert!(message.contains("_genre_:_Drama_"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_an_error() {
        let (_dir, model) = shell_model("echo boom >&2; exit 3", Duration::from_secs(5));
        let err = model.recommend(&query()).await.unwrap_err();
        assert!(matches!(err, AppError::Model(ref m) if m.contains("boom")));
    }

    #[tokio::test]
    async fn test_malformed_output_is_an_error() {
        let (_dir, model) = shell_model("echo not-json", Duration::from_secs(5));
        let err = model.recommend(&query()).await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[tokio::test]
    async fn test_empty_recommendations_are_an_error() {
        let (_dir, model) = shell_model(
            r#"echo '{"recommendations": [], "cluster": 2}'"#,
            Duration::from_secs(5),
        );
        assert!(model.recommend(&query()).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let (_dir, model) = shell_model("sleep 5", Duration::from_millis(100));
        let err = model.recommend(&query()).await.unwrap_err();
        assert!(matches!(err, AppError::Model(ref m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn test_missing_interpreter() {
        let model = ScriptModel::new(
            "/nonexistent/interpreter",
            "model.py",
            Duration::from_secs(1),
            Arc::new(Vocabulary::default()),
        );
        assert!(matches!(
            model.recommend(&query()).await,
            Err(AppError::Io(_))
        ));
    }
}
