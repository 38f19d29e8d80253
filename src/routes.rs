// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::panic_response,
    handlers::{exam, health},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the exam routes under `/api/exams`.
/// * Applies global middleware (panic guard, Trace, CORS).
/// * Injects the shared state (catalog and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let exam_routes = Router::new()
        .route("/options", get(exam::list_options))
        .route("/generate", post(exam::generate_exam))
        .route("/submit", post(exam::submit_answers));

    Router::new()
        .nest("/api/exams", exam_routes)
        .route("/api/health", get(health::health))
        // Global Middleware (outermost first)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
