// src/handlers/exam.rs

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    catalog::Catalog,
    config::{Config, ScoringMode},
    engine::{
        assembler::{ExamParams, assemble_exam},
        random::RngSource,
        scoring::{count_matches, fixed_ratio_correct, summarize},
    },
    error::AppError,
    models::{
        exam::{ExamOptions, GenerateExamRequest, GenerateExamResponse},
        exam_result::{ExamResult, SubmitAnswersRequest, SubmitAnswersResponse},
    },
    utils::exam_token::{sign_exam_token, verify_exam_token},
};

/// Lists the subjects and exam boards known to the catalog, both sorted.
pub async fn list_options(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(ExamOptions {
        subjects: catalog.subjects(),
        exam_boards: catalog.exam_boards(),
    })
}

/// Generates a simulated exam.
///
/// * Resolves the candidate topics (band and keyword filters, silent fallback).
/// * Samples one weighted topic per question slot.
/// * Signs the answer key when answer-key scoring is enabled.
/// * Waits `simulated_latency_ms` before answering.
pub async fn generate_exam(
    State(catalog): State<Arc<Catalog>>,
    State(config): State<Config>,
    payload: Result<Json<GenerateExamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let params = ExamParams::try_from(&req).map_err(AppError::BadRequest)?;

    let mut exam = {
        let mut rng = RngSource::from_entropy();
        assemble_exam(&catalog, &params, &mut rng)
    };

    if config.scoring_mode == ScoringMode::AnswerKey {
        let secret = config.exam_token_secret.as_deref().ok_or_else(|| {
            AppError::InternalServerError("Exam token secret is not configured".to_string())
        })?;
        let key = exam
            .questions
            .iter()
            .map(|q| q.correct_option_index)
            .collect();
        exam.exam_token = Some(sign_exam_token(
            &exam.id,
            &exam.exam_board,
            key,
            secret,
            config.exam_token_ttl_secs,
        )?);
    }

    tracing::info!(
        exam_id = %exam.id,
        exam_board = %exam.exam_board,
        subject = %exam.subject,
        questions = exam.questions.len(),
        "Exam generated"
    );

    if config.simulated_latency_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.simulated_latency_ms)).await;
    }

    Ok(Json(GenerateExamResponse { exam }))
}

/// Scores submitted answers.
///
/// With fixed-ratio scoring the answers are only counted; with answer-key
/// scoring they are compared against the key inside the exam token.
pub async fn submit_answers(
    State(config): State<Config>,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    if req.answers.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }
    req.validate()?;

    let (correct, total, exam_id, exam_board) = match config.scoring_mode {
        ScoringMode::FixedRatio => (
            fixed_ratio_correct(req.answers.len()),
            req.answers.len(),
            req.exam_id.clone(),
            req.exam_board.clone(),
        ),
        ScoringMode::AnswerKey => {
            let token = req
                .exam_token
                .as_deref()
                .ok_or_else(|| AppError::BadRequest("Exam token is required".to_string()))?;
            let secret = config.exam_token_secret.as_deref().ok_or_else(|| {
                AppError::InternalServerError("Exam token secret is not configured".to_string())
            })?;
            let claims = verify_exam_token(token, secret)?;

            if let Some(id) = &req.exam_id
                && id != &claims.sub
            {
                return Err(AppError::BadRequest(
                    "Exam token does not belong to this exam".to_string(),
                ));
            }
            if req.answers.len() != claims.key.len() {
                return Err(AppError::BadRequest(format!(
                    "Expected {} answers, got {}",
                    claims.key.len(),
                    req.answers.len()
                )));
            }

            (
                count_matches(&req.answers, &claims.key),
                claims.key.len(),
                Some(claims.sub),
                claims.board,
            )
        }
    };

    let summary = summarize(correct, total);

    let result = ExamResult {
        id: format!("res-{}", Uuid::new_v4()),
        exam_id,
        exam_board,
        total_questions: summary.total,
        correct_count: summary.correct,
        wrong_count: summary.wrong,
        score: summary.score,
        percentage: summary.percentage,
        classification: summary.classification,
        message: summary.classification.message().to_string(),
        scoring_mode: config.scoring_mode.as_str().to_string(),
        submitted_at: Utc::now(),
    };

    tracing::info!(
        result_id = %result.id,
        score = result.score,
        total = result.total_questions,
        "Answers scored"
    );

    Ok(Json(SubmitAnswersResponse { result }))
}
