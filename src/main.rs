use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fiapflix_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        catalog::Catalog,
        posters::PosterService,
        recommender::{LocalModel, RecommendationModel, Recommender, ScriptModel},
        vocabulary::Vocabulary,
    },
};

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fiapflix_api=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_vocabulary(path: Option<&str>) -> Vocabulary {
    let Some(path) = path else {
        return Vocabulary::default();
    };

    match Vocabulary::load(path) {
        Ok(vocabulary) => {
            tracing::info!(path, "Loaded vocabulary override");
            vocabulary
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to load vocabulary file, using built-in tables");
            Vocabulary::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let vocabulary = Arc::new(load_vocabulary(config.vocabulary_path.as_deref()));
    let catalog = Catalog::load(config.catalog_path.as_deref()).context("Failed to load movie catalog")?;
    tracing::info!(movies = catalog.len(), "Catalog ready");

    let fallback: Arc<dyn RecommendationModel> =
        Arc::new(LocalModel::new(catalog.clone(), vocabulary.clone()));
    let primary = ScriptModel::from_config(&config, vocabulary.clone())
        .map(|model| Arc::new(model) as Arc<dyn RecommendationModel>);

    let state = AppState {
        posters: PosterService::from_config(&config),
        recommender: Recommender::new(primary, fallback),
        catalog,
        vocabulary,
    };

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
