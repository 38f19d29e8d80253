// tests/router_tests.rs

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use simulados::{
    catalog::Catalog,
    config::{Config, ScoringMode},
    create_router,
    state::AppState,
};
use tower::ServiceExt;

fn app(latency_ms: u64) -> axum::Router {
    let config = Config {
        server_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        simulated_latency_ms: latency_ms,
        scoring_mode: ScoringMode::FixedRatio,
        exam_token_secret: None,
        exam_token_ttl_secs: 600,
        catalog_path: None,
        cors_origins: vec!["http://localhost:3000".to_string()],
    };
    create_router(AppState::new(Catalog::builtin(), config))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn generate_waits_for_configured_latency() {
    let started = std::time::Instant::now();
    let response = app(150)
        .oneshot(post_json("/api/exams/generate", r#"{"subject":"Arts"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(150));

    let body = json_body(response).await;
    assert_eq!(body["exam"]["officialCount"], 4);
}

#[tokio::test]
async fn keyword_search_narrows_topics() {
    let response = app(0)
        .oneshot(post_json(
            "/api/exams/generate",
            r#"{"subject":"Mathematics","searchKeyword":"LOGARITHM"}"#,
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    let questions = body["exam"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 45);
    assert!(questions.iter().all(|q| q["topic"] == "Logarithms"));
    assert_eq!(questions[0]["probabilityColor"], "blue");
}

#[tokio::test]
async fn keyword_miss_falls_back_to_all_topics() {
    let response = app(0)
        .oneshot(post_json(
            "/api/exams/generate",
            r#"{"subject":"Mathematics","searchKeyword":"quantum chromodynamics"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let hot: Vec<&str> = body["exam"]["aiAnalysis"]["hotTopics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        hot,
        vec![
            "Plane and Solid Geometry",
            "Functions and Graphs",
            "Statistics and Probability",
            "Arithmetic, Ratio and Proportion",
        ]
    );
}

#[tokio::test]
async fn fixed_difficulty_applies_to_every_question() {
    let response = app(0)
        .oneshot(post_json(
            "/api/exams/generate",
            r#"{"examBoard":"UERJ","subject":"Biology","difficultyFilter":"Easy"}"#,
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    let questions = body["exam"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| q["difficulty"] == "Easy"));
    assert!(
        body["exam"]["aiAnalysis"]["summaryText"]
            .as_str()
            .unwrap()
            .contains("easy questions")
    );
}

#[tokio::test]
async fn submit_with_missing_body_field_is_bad_request() {
    let response = app(0)
        .oneshot(post_json("/api/exams/submit", r#"{"examBoard":"ENEM"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No answers submitted");
}

#[tokio::test]
async fn submit_three_answers_rounds_down() {
    let response = app(0)
        .oneshot(post_json("/api/exams/submit", r#"{"answers":[0,1,2]}"#))
        .await
        .unwrap();

    let body = json_body(response).await;
    // floor(0.7 * 3) = 2, 2/3 -> 666
    assert_eq!(body["result"]["correctCount"], 2);
    assert_eq!(body["result"]["score"], 666);
    assert_eq!(body["result"]["classification"], "VeryGood");
    assert_eq!(body["result"]["examBoard"], "ENEM");
}
