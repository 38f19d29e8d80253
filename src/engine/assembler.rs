// src/engine/assembler.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    config::{DEFAULT_QUESTION_COUNT, MARATHON_QUESTION_COUNT},
    engine::{
        random::RandomSource,
        sampler::{pick_topic, resolve_candidates},
    },
    models::{
        exam::{AiAnalysis, ExamMode, GenerateExamRequest, SimulatedExam},
        question::{Difficulty, DifficultyFilter, GeneratedQuestion, OPTION_COUNT, ProbabilityLabel},
        topic::{ProbabilityBand, Topic},
    },
};

pub const TREND_PHRASES: [&str; 3] = ["Rising trend", "Stable", "Recurring"];

const FIRST_EXAM_YEAR: i32 = 2010;
const EXAM_YEAR_SPAN: usize = 16;
const MAX_HOT_TOPICS: usize = 5;

const PLACEHOLDER_OPTIONS: [&str; OPTION_COUNT] = [
    "Option A (Incorrect)",
    "Option B (Correct)",
    "Option C (Distractor)",
    "Option D (Incorrect)",
    "Option E (Incorrect)",
];
const PLACEHOLDER_CORRECT_INDEX: usize = 1;

/// Normalized generation parameters.
#[derive(Debug, Clone)]
pub struct ExamParams {
    pub exam_board: String,
    pub subject: String,
    pub difficulty: DifficultyFilter,
    pub band: ProbabilityBand,
    pub mode: ExamMode,
    pub year: Option<i32>,
    pub keyword: String,
}

impl TryFrom<&GenerateExamRequest> for ExamParams {
    type Error = String;

    fn try_from(req: &GenerateExamRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            exam_board: req.exam_board.trim().to_string(),
            subject: req.subject.trim().to_string(),
            difficulty: req.difficulty_filter,
            band: req.probability_band_filter,
            mode: req.mode,
            year: req.year_filter.year()?,
            keyword: req.search_keyword.clone(),
        })
    }
}

/// Official count for the pair, 10 when unconfigured, 100 in marathon mode.
pub fn question_count(catalog: &Catalog, exam_board: &str, subject: &str, mode: ExamMode) -> usize {
    if mode == ExamMode::Marathon {
        return MARATHON_QUESTION_COUNT;
    }
    catalog
        .official_count(exam_board, subject)
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}

/// One draw: above 0.6 Hard, above 0.3 Medium, otherwise Easy.
pub fn roll_difficulty<R: RandomSource + ?Sized>(rng: &mut R) -> Difficulty {
    let r = rng.next_uniform();
    if r > 0.6 {
        Difficulty::Hard
    } else if r > 0.3 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// Builds a fresh simulated exam. Nothing is stored.
pub fn assemble_exam<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    params: &ExamParams,
    rng: &mut R,
) -> SimulatedExam {
    let count = question_count(catalog, &params.exam_board, &params.subject, params.mode);
    let candidates = resolve_candidates(
        catalog.topics_for(&params.subject),
        params.band,
        &params.keyword,
    );

    let exam_id = format!("sim-{}", Uuid::new_v4());

    let questions = (0..count)
        .map(|slot| {
            let topic = pick_topic(&candidates, rng);
            build_question(catalog, params, &exam_id, slot, &topic, rng)
        })
        .collect();

    let hot_topics = candidates
        .iter()
        .filter(|t| t.trend.is_hot())
        .map(|t| t.name.clone())
        .take(MAX_HOT_TOPICS)
        .collect();

    SimulatedExam {
        id: exam_id,
        exam_board: params.exam_board.clone(),
        subject: params.subject.clone(),
        official_count: count,
        questions,
        ai_analysis: AiAnalysis {
            total_analyzed: "Exams from 2010 to 2025".to_string(),
            hot_topics,
            summary_text: summary_text(params),
        },
        generated_at: Utc::now(),
        exam_token: None,
    }
}

fn build_question<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    params: &ExamParams,
    exam_id: &str,
    slot: usize,
    topic: &Topic,
    rng: &mut R,
) -> GeneratedQuestion {
    let mock = catalog.find_question(&params.subject, &topic.name);

    let difficulty = match params.difficulty.fixed() {
        Some(d) => d,
        None => roll_difficulty(rng),
    };

    let label = ProbabilityLabel::from_weight(topic.probability);
    let accuracy = ((0.92 + rng.next_uniform() * 0.07) * 100.0).round() / 100.0;
    let questions_analyzed = 350 + (rng.next_uniform() * 800.0).floor() as u32;
    let trend_phrase = TREND_PHRASES[rng.next_index(TREND_PHRASES.len())].to_string();

    let (source, year) = match (params.year, mock) {
        (Some(year), _) => (format!("{} {}", params.exam_board, year), year),
        (None, Some(q)) => (q.source.clone(), q.year),
        (None, None) => {
            let year = FIRST_EXAM_YEAR + rng.next_index(EXAM_YEAR_SPAN) as i32;
            (format!("{} {}", params.exam_board, year), year)
        }
    };

    let (prompt, options, correct_option_index, explanation) = match mock {
        Some(q) => (
            q.prompt.clone(),
            q.options.clone(),
            q.correct_option_index,
            q.explanation.clone(),
        ),
        None => (
            format!(
                "({} question on {}) This question simulates the style of the {} exam board. \
                 The prompt would cover {} concepts at a {} level of demand.",
                difficulty.as_str(),
                topic.name,
                params.exam_board,
                topic.name,
                difficulty.as_str().to_lowercase()
            ),
            PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect(),
            PLACEHOLDER_CORRECT_INDEX,
            format!(
                "Detailed explanation of {} focused on the {} level.",
                topic.name,
                difficulty.as_str().to_lowercase()
            ),
        ),
    };

    GeneratedQuestion {
        id: format!("{}-q{}", exam_id, slot + 1),
        subject: params.subject.clone(),
        topic: topic.name.clone(),
        probability_label: label,
        probability_color: label.color().to_string(),
        accuracy,
        questions_analyzed,
        trend_phrase,
        prompt,
        options,
        correct_option_index,
        explanation,
        difficulty,
        source,
        year,
    }
}

fn summary_text(params: &ExamParams) -> String {
    let focus = match params.difficulty.fixed() {
        Some(d) => d.as_str().to_lowercase(),
        None => "mixed".to_string(),
    };
    let band = match params.band {
        ProbabilityBand::All => "general",
        ProbabilityBand::High => "high",
        ProbabilityBand::Medium => "medium",
        ProbabilityBand::Low => "low",
    };
    format!(
        "{} mock exam ({}) generated with a focus on {} questions and {} probability topics.",
        params.subject, params.exam_board, focus, band
    )
}
