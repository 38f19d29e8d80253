// tests/api_tests.rs

use serde_json::Value;
use simulados::{
    catalog::Catalog,
    config::{Config, ScoringMode},
    routes,
    state::AppState,
};

fn test_config(scoring_mode: ScoringMode) -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        simulated_latency_ms: 0,
        scoring_mode,
        exam_token_secret: Some("test_secret_for_integration_tests".to_string()),
        exam_token_ttl_secs: 600,
        catalog_path: None,
        cors_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(scoring_mode: ScoringMode) -> String {
    let state = AppState::new(Catalog::builtin(), test_config(scoring_mode));
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn generate(client: &reqwest::Client, address: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/exams/generate", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

async fn submit(client: &reqwest::Client, address: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/exams/submit", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_reports_ok() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let body: Value = reqwest::get(format!("{}/api/health", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn options_are_sorted() {
    let address = spawn_app(ScoringMode::FixedRatio).await;

    let response = reqwest::get(format!("{}/api/exams/options", address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let boards: Vec<&str> = body["examBoards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(boards, vec!["ENEM", "FUVEST", "UERJ", "UNESP (VUNESP)", "UNICAMP"]);

    let subjects: Vec<String> = body["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let mut sorted = subjects.clone();
    sorted.sort();
    assert_eq!(subjects, sorted);
    assert!(subjects.contains(&"Mathematics".to_string()));
}

#[tokio::test]
async fn generate_fuvest_mathematics() {
    // Arrange
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    // Act
    let response = generate(
        &client,
        &address,
        serde_json::json!({ "examBoard": "FUVEST", "subject": "Mathematics" }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let exam = &body["exam"];
    assert_eq!(exam["officialCount"], 10);
    assert!(exam.get("examToken").is_none());

    let questions = exam["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    for q in questions {
        assert!(!q["prompt"].as_str().unwrap().is_empty());
        let options = q["options"].as_array().unwrap();
        assert_eq!(options.len(), 5);
        assert!((q["correctOptionIndex"].as_u64().unwrap() as usize) < options.len());
        let label = q["probabilityLabel"].as_str().unwrap();
        assert!(["VeryHigh", "High", "Medium"].contains(&label));
    }
}

#[tokio::test]
async fn generate_defaults_to_enem_mathematics() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let body: Value = generate(&client, &address, serde_json::json!({}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["exam"]["examBoard"], "ENEM");
    assert_eq!(body["exam"]["subject"], "Mathematics");
    assert_eq!(body["exam"]["questions"].as_array().unwrap().len(), 45);
}

#[tokio::test]
async fn marathon_mode_yields_one_hundred_questions() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    for subject in ["Mathematics", "Arts", "Astrology"] {
        let body: Value = generate(
            &client,
            &address,
            serde_json::json!({ "subject": subject, "mode": "marathon" }),
        )
        .await
        .json()
        .await
        .unwrap();
        assert_eq!(body["exam"]["questions"].as_array().unwrap().len(), 100);
    }
}

#[tokio::test]
async fn unconfigured_pair_yields_ten_questions() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let body: Value = generate(
        &client,
        &address,
        serde_json::json!({ "examBoard": "FUVEST", "subject": "Arts" }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(body["exam"]["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn high_band_without_matches_falls_back() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    // no History topic weighs 0.20 or more
    let response = generate(
        &client,
        &address,
        serde_json::json!({ "subject": "History", "probabilityBandFilter": "High" }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let questions = body["exam"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 15);
    assert!(questions.iter().all(|q| q["topic"] != "General"));
}

#[tokio::test]
async fn year_filter_sets_source() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let body: Value = generate(
        &client,
        &address,
        serde_json::json!({ "examBoard": "UERJ", "subject": "Physics", "yearFilter": 2020 }),
    )
    .await
    .json()
    .await
    .unwrap();

    for q in body["exam"]["questions"].as_array().unwrap() {
        assert_eq!(q["source"], "UERJ 2020");
        assert_eq!(q["year"], 2020);
    }
}

#[tokio::test]
async fn invalid_year_is_rejected() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let response = generate(&client, &address, serde_json::json!({ "yearFilter": "someday" })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("someday"));
}

#[tokio::test]
async fn unknown_mode_is_rejected() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let response = generate(&client, &address, serde_json::json!({ "mode": "sprint" })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_ten_answers_scores_seven_hundred() {
    // Arrange
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    // Act
    let response = submit(
        &client,
        &address,
        serde_json::json!({
            "examId": "sim-test",
            "examBoard": "FUVEST",
            "answers": [0, 1, 2, 3, 4, 0, 1, 2, 3, 4]
        }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let result = &body["result"];
    assert_eq!(result["totalQuestions"], 10);
    assert_eq!(result["correctCount"], 7);
    assert_eq!(result["wrongCount"], 3);
    assert_eq!(result["score"], 700);
    assert_eq!(result["classification"], "VeryGood");
    assert_eq!(result["examId"], "sim-test");
    assert_eq!(result["examBoard"], "FUVEST");
    assert_eq!(result["scoringMode"], "fixed_ratio");
}

#[tokio::test]
async fn submit_without_answers_is_client_error() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let empty = submit(&client, &address, serde_json::json!({ "examId": "sim-1", "answers": [] })).await;
    assert_eq!(empty.status().as_u16(), 400);
    let body: Value = empty.json().await.unwrap();
    assert_eq!(body["error"], "No answers submitted");

    let missing = submit(&client, &address, serde_json::json!({ "examId": "sim-1" })).await;
    assert_eq!(missing.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_json_is_client_error() {
    let address = spawn_app(ScoringMode::FixedRatio).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/exams/submit", address))
        .header("content-type", "application/json")
        .body("{\"answers\": [1, 2")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn answer_key_flow_scores_real_answers() {
    // Arrange
    let address = spawn_app(ScoringMode::AnswerKey).await;
    let client = reqwest::Client::new();

    let body: Value = generate(
        &client,
        &address,
        serde_json::json!({ "examBoard": "FUVEST", "subject": "Physics" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let exam = &body["exam"];
    let token = exam["examToken"].as_str().expect("token issued").to_string();
    let exam_id = exam["id"].as_str().unwrap().to_string();

    let key: Vec<u64> = exam["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["correctOptionIndex"].as_u64().unwrap())
        .collect();
    assert_eq!(key.len(), 10);

    // Act: first 8 right, last 2 left blank
    let mut answers: Vec<Value> = key.iter().map(|k| serde_json::json!(k)).collect();
    answers[8] = Value::Null;
    answers[9] = Value::Null;

    let response = submit(
        &client,
        &address,
        serde_json::json!({ "examId": exam_id, "answers": answers, "examToken": token }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let result = &body["result"];
    assert_eq!(result["correctCount"], 8);
    assert_eq!(result["score"], 800);
    assert_eq!(result["classification"], "Excellent");
    assert_eq!(result["examBoard"], "FUVEST");
    assert_eq!(result["scoringMode"], "answer_key");
}

#[tokio::test]
async fn answer_key_mode_rejects_bad_submissions() {
    let address = spawn_app(ScoringMode::AnswerKey).await;
    let client = reqwest::Client::new();

    let body: Value = generate(
        &client,
        &address,
        serde_json::json!({ "examBoard": "FUVEST", "subject": "Physics" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let token = body["exam"]["examToken"].as_str().unwrap().to_string();
    let exam_id = body["exam"]["id"].as_str().unwrap().to_string();

    // missing token
    let response = submit(&client, &address, serde_json::json!({ "answers": [1, 2] })).await;
    assert_eq!(response.status().as_u16(), 400);

    // tampered token
    let response = submit(
        &client,
        &address,
        serde_json::json!({ "answers": [1], "examToken": format!("{}x", token) }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    // wrong number of answers
    let response = submit(
        &client,
        &address,
        serde_json::json!({ "answers": [1, 2, 3], "examToken": token }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    // token of another exam
    let response = submit(
        &client,
        &address,
        serde_json::json!({ "examId": "sim-other", "answers": vec![1; 10], "examToken": token }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Exam token does not belong to this exam");

    // same exam id is accepted
    let response = submit(
        &client,
        &address,
        serde_json::json!({ "examId": exam_id, "answers": vec![1; 10], "examToken": token }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
}
