// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

/// Question count used when the exam board has no official count for a subject.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Marathon mode always produces this many questions.
pub const MARATHON_QUESTION_COUNT: usize = 100;

/// How submitted answers are turned into a correct count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Assumes 70% of the submitted answers are correct without reading them.
    FixedRatio,
    /// Compares answers against the key carried in the signed exam token.
    AnswerKey,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::FixedRatio => "fixed_ratio",
            ScoringMode::AnswerKey => "answer_key",
        }
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed_ratio" | "fixed" => Ok(ScoringMode::FixedRatio),
            "answer_key" | "compare" => Ok(ScoringMode::AnswerKey),
            other => Err(format!("unknown scoring mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    /// Artificial wait before the generate endpoint responds.
    pub simulated_latency_ms: u64,
    pub scoring_mode: ScoringMode,
    pub exam_token_secret: Option<String>,
    pub exam_token_ttl_secs: u64,
    /// Optional JSON file replacing the built-in catalog.
    pub catalog_path: Option<String>,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        let simulated_latency_ms = lookup("SIMULATED_LATENCY_MS")
            .map(|v| v.parse().expect("SIMULATED_LATENCY_MS must be a number of milliseconds"))
            .unwrap_or(1000);

        let scoring_mode = lookup("SCORING_MODE")
            .map(|v| v.parse::<ScoringMode>().expect("SCORING_MODE must be 'fixed_ratio' or 'answer_key'"))
            .unwrap_or(ScoringMode::FixedRatio);

        let exam_token_secret = lookup("EXAM_TOKEN_SECRET");
        if scoring_mode == ScoringMode::AnswerKey && exam_token_secret.is_none() {
            panic!("EXAM_TOKEN_SECRET must be set when SCORING_MODE=answer_key");
        }

        let exam_token_ttl_secs = lookup("EXAM_TOKEN_TTL_SECS")
            .map(|v| v.parse().expect("EXAM_TOKEN_TTL_SECS must be a number of seconds"))
            .unwrap_or(7200);

        let catalog_path = lookup("CATALOG_PATH").filter(|p| !p.trim().is_empty());

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        Self {
            server_addr,
            rust_log,
            log_dir,
            simulated_latency_ms,
            scoring_mode,
            exam_token_secret,
            exam_token_ttl_secs,
            catalog_path,
            cors_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
