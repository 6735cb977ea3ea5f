use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use fiapflix_api::{
    routes::{create_router, AppState},
    services::{
        catalog::Catalog,
        posters::PosterService,
        recommender::{LocalModel, Recommender},
        vocabulary::Vocabulary,
    },
};

fn create_test_server() -> TestServer {
    let catalog = Catalog::builtin().unwrap();
    let vocabulary = Arc::new(Vocabulary::default());
    let state = AppState {
        recommender: Recommender::new(
            None,
            Arc::new(LocalModel::new(catalog.clone(), vocabulary.clone())),
        ),
        posters: PosterService::new(None, "http://127.0.0.1:9".to_string(), 16),
        catalog,
        vocabulary,
    };
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("6f2a5e52-5d0c-4b8a-9a53-0c1f4e8b9d21"),
        )
        .await;
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "6f2a5e52-5d0c-4b8a-9a53-0c1f4e8b9d21"
    );

    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_search_by_director() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/ai-search")
        .json(&json!({ "query": "Filmes do diretor Christopher Nolan" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"], "Filmes do diretor Christopher Nolan");
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["title_en"], "The Dark Knight");
    assert_eq!(body["analysis"]["relaxed_filters"], false);
    assert_eq!(body["analysis"]["results_count"], 1);
    assert!(body["analysis"]["applied_filters"]["director"].is_string());
    assert!(body["natural_response"].as_str().unwrap().contains("Cavaleiro"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_search_best_of_decade() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/ai-search")
        .json(&json!({ "query": "Melhores filmes de 1990 a 2000" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["analysis"]["detected_intent"], "ranking");
    assert_eq!(body["analysis"]["applied_filters"]["year"], json!({ "min": 1990, "max": 2000 }));
    let years: Vec<i64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["year"].as_i64().unwrap())
        .collect();
    assert!(!years.is_empty());
    assert!(years.iter().all(|y| (1990..=2000).contains(y)));
}

#[tokio::test]
async fn test_search_empty_query_is_accepted() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/ai-search")
        .json(&json!({ "query": "" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["analysis"]["relaxed_filters"], true);
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_search_rejects_missing_or_non_string_query() {
    let server = create_test_server();

    for body in [json!({}), json!({ "query": 42 }), json!({ "query": null })] {
        let response = server.post("/api/v1/ai-search").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Query é obrigatória e deve ser uma string"
        );
    }
}

#[tokio::test]
async fn test_search_rejects_malformed_body() {
    let server = create_test_server();
    let response = server.post("/api/v1/ai-search").text("{not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_search_usage() {
    let server = create_test_server();
    let response = server.get("/api/v1/ai-search").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "API de Busca IA - FiapFlix");
    assert_eq!(body["examples"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_recommend_from_synopsis() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommend")
        .json(&json!({
            "synopsis": "Uma jornada de fantasia e heroísmo para destruir um anel"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["cluster"], 4);
    assert_eq!(body["method"], "TF-IDF (Sinopses)");
    assert_eq!(body["recommendations"][0]["id"], "6");
    assert_eq!(body["evidence"]["selected_cluster"], 4);
    assert_eq!(body["cluster_analysis"]["movie_count"], 2);
    assert!(body["confidence"].as_f64().unwrap() >= 0.3);
}

#[tokio::test]
async fn test_recommend_method_label() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "synopsis": "Um pistoleiro procura ouro no deserto", "method": "method2" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["method"], "Sinopse Personalizada");
    assert_eq!(body["cluster"], 0);
}

#[tokio::test]
async fn test_recommend_requires_synopsis() {
    let server = create_test_server();

    for body in [json!({}), json!({ "synopsis": "   " })] {
        let response = server.post("/api/v1/recommend").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Sinopse é obrigatória");
    }
}

#[tokio::test]
async fn test_recommend_samples() {
    let server = create_test_server();
    let response = server.get("/api/v1/recommend").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["method"], "method1");
    assert_eq!(body["synopses"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_movies_listing() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 10);
    assert!(movies.iter().all(|m| m["poster_url"].is_string()));
    assert!(movies.iter().all(|m| m["sinopse"].is_string()));
}

#[tokio::test]
async fn test_enhance_synopsis() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/enhance-synopsis")
        .json(&json!({
            "title": "Heat",
            "year": 1995,
            "genre": "Action",
            "synopsis": "Um ladrão e um detetive se enfrentam"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["method"], "local_template");
    assert_eq!(body["original_synopsis"], "Um ladrão e um detetive se enfrentam");
    assert!(body["enhanced_synopsis"]
        .as_str()
        .unwrap()
        .starts_with("Uma aventura repleta de ação: Um ladrão"));
}

#[tokio::test]
async fn test_enhance_requires_title_and_synopsis() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/enhance-synopsis")
        .json(&json!({ "title": "Heat" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
