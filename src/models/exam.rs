// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    question::{DifficultyFilter, GeneratedQuestion},
    topic::ProbabilityBand,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamMode {
    #[default]
    Standard,
    Marathon,
}

/// Year requested by the client: `"All"`, a numeric string, or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearFilter {
    Year(i32),
    Label(String),
}

impl Default for YearFilter {
    fn default() -> Self {
        YearFilter::Label("All".to_string())
    }
}

impl YearFilter {
    /// Returns `None` when no particular year was asked for.
    pub fn year(&self) -> Result<Option<i32>, String> {
        let year = match self {
            YearFilter::Year(y) => *y,
            YearFilter::Label(label) => {
                let label = label.trim();
                if label.is_empty() || label.eq_ignore_ascii_case("all") {
                    return Ok(None);
                }
                label
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid year filter '{}'", label))?
            }
        };

        if !(1900..=2100).contains(&year) {
            return Err(format!("Year filter {} is out of range", year));
        }
        Ok(Some(year))
    }
}

/// DTO for requesting a generated exam. Every field is optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateExamRequest {
    #[validate(length(min = 1, max = 50, message = "Exam board must be between 1 and 50 characters."))]
    pub exam_board: String,

    #[validate(length(min = 1, max = 80, message = "Subject must be between 1 and 80 characters."))]
    pub subject: String,

    #[serde(alias = "difficulty")]
    pub difficulty_filter: DifficultyFilter,

    #[serde(alias = "probability")]
    pub probability_band_filter: ProbabilityBand,

    pub mode: ExamMode,

    #[serde(alias = "year")]
    pub year_filter: YearFilter,

    #[serde(alias = "search")]
    #[validate(length(max = 100, message = "Search keyword must be at most 100 characters."))]
    pub search_keyword: String,
}

impl Default for GenerateExamRequest {
    fn default() -> Self {
        Self {
            exam_board: "ENEM".to_string(),
            subject: "Mathematics".to_string(),
            difficulty_filter: DifficultyFilter::All,
            probability_band_filter: ProbabilityBand::All,
            mode: ExamMode::Standard,
            year_filter: YearFilter::default(),
            search_keyword: String::new(),
        }
    }
}

/// Cosmetic summary shown next to the generated exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub total_analyzed: String,
    /// At most five topic names.
    pub hot_topics: Vec<String>,
    pub summary_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedExam {
    pub id: String,
    pub exam_board: String,
    pub subject: String,
    pub official_count: usize,
    pub questions: Vec<GeneratedQuestion>,
    pub ai_analysis: AiAnalysis,
    pub generated_at: DateTime<Utc>,

    /// Signed answer key, only issued when answer-key scoring is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateExamResponse {
    pub exam: SimulatedExam,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamOptions {
    pub subjects: Vec<String>,
    pub exam_boards: Vec<String>,
}
