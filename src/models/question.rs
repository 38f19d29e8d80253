// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Every question, mock or synthesized, has exactly this many options.
pub const OPTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Difficulty requested by the client. `All` lets each slot roll its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyFilter {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl DifficultyFilter {
    pub fn fixed(&self) -> Option<Difficulty> {
        match self {
            DifficultyFilter::All => None,
            DifficultyFilter::Easy => Some(Difficulty::Easy),
            DifficultyFilter::Medium => Some(Difficulty::Medium),
            DifficultyFilter::Hard => Some(Difficulty::Hard),
        }
    }
}

/// A hand-written question from the mock bank.
/// Looked up by its (subject, topic) pair.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_correct_index))]
pub struct MockQuestion {
    #[validate(length(min = 1))]
    pub subject: String,

    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,

    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_option_index: usize,

    pub explanation: String,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[validate(length(min = 1))]
    pub topic: String,

    pub source: String,

    pub year: i32,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(validator::ValidationError::new("options_must_have_five_entries"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
    }
    Ok(())
}

fn validate_correct_index(question: &MockQuestion) -> Result<(), validator::ValidationError> {
    if question.correct_option_index >= question.options.len() {
        return Err(validator::ValidationError::new("correct_option_out_of_range"));
    }
    Ok(())
}

/// Display bucket derived from a topic's raw weight.
///
/// Thresholds differ from `ProbabilityBand` on purpose: the label is
/// meant to look alarming, the band is a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityLabel {
    VeryHigh,
    High,
    Medium,
}

impl ProbabilityLabel {
    pub fn from_weight(weight: f64) -> Self {
        if weight >= 0.25 {
            ProbabilityLabel::VeryHigh
        } else if weight >= 0.15 {
            ProbabilityLabel::High
        } else {
            ProbabilityLabel::Medium
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ProbabilityLabel::VeryHigh => "red",
            ProbabilityLabel::High => "orange",
            ProbabilityLabel::Medium => "blue",
        }
    }
}

/// A question slot of a generated exam, as sent to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub probability_label: ProbabilityLabel,
    pub probability_color: String,

    /// Display-only figure in [0.92, 0.99].
    pub accuracy: f64,

    /// Display-only figure in [350, 1149].
    pub questions_analyzed: u32,

    pub trend_phrase: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub source: String,
    pub year: i32,
}
