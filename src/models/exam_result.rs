// src/models/exam_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for submitting answers to a generated exam.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    #[serde(default)]
    pub exam_id: Option<String>,

    #[serde(default = "default_exam_board")]
    #[validate(length(min = 1, max = 50))]
    pub exam_board: String,

    /// One entry per question, in order. `null` marks an unanswered question.
    #[serde(default)]
    #[validate(length(min = 1, message = "Answers are required"))]
    pub answers: Vec<Option<usize>>,

    /// Token received from the generate endpoint (answer-key scoring only).
    #[serde(default)]
    pub exam_token: Option<String>,
}

fn default_exam_board() -> String {
    "ENEM".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
}

impl Classification {
    /// Bands on the 0–1000 score scale.
    pub fn from_score(score: u32) -> Self {
        if score >= 800 {
            Classification::Excellent
        } else if score >= 600 {
            Classification::VeryGood
        } else if score >= 400 {
            Classification::Good
        } else {
            Classification::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Classification::Excellent => "Ready for the big exams!",
            Classification::VeryGood => "Great preparation!",
            Classification::Good => "Keep studying!",
            Classification::NeedsImprovement => "Don't give up!",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: String,
    pub exam_id: Option<String>,
    pub exam_board: String,
    pub total_questions: usize,
    pub correct_count: usize,
    pub wrong_count: usize,
    pub score: u32,
    pub percentage: f64,
    pub classification: Classification,
    pub message: String,
    pub scoring_mode: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswersResponse {
    pub result: ExamResult,
}
