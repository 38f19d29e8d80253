// src/engine/scoring.rs

use crate::models::exam_result::Classification;

/// Scale of the reported score.
pub const MAX_SCORE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub score: u32,
    pub percentage: f64,
    pub classification: Classification,
}

/// Legacy grading: 70% of the answers are assumed correct, rounded down.
/// The answers themselves are never looked at.
pub fn fixed_ratio_correct(total: usize) -> usize {
    total * 7 / 10
}

/// Positions where the submitted answer equals the key.
/// Unanswered entries never count.
pub fn count_matches(answers: &[Option<usize>], key: &[usize]) -> usize {
    answers
        .iter()
        .zip(key)
        .filter(|(given, expected)| **given == Some(**expected))
        .count()
}

/// Turns a correct count into the 0–1000 score and its band.
/// `total` must be non-zero.
pub fn summarize(correct: usize, total: usize) -> ScoreSummary {
    let correct = correct.min(total);
    let score = (correct as u64 * MAX_SCORE as u64 / total as u64) as u32;

    ScoreSummary {
        total,
        correct,
        wrong: total - correct,
        score,
        percentage: correct as f64 * 100.0 / total as f64,
        classification: Classification::from_score(score),
    }
}
