// src/models/topic.rs

use serde::{Deserialize, Serialize};

/// Qualitative trend attached to a topic in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Trend {
    /// Topics trending High or VeryHigh are reported as "hot".
    pub fn is_hot(&self) -> bool {
        matches!(self, Trend::High | Trend::VeryHigh)
    }
}

/// A syllabus sub-area of a subject with its historical-appearance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,

    /// Weight in (0, 1]. Weights of a subject need not sum to 1.
    pub probability: f64,

    pub trend: Trend,
}

impl Topic {
    pub fn new(name: &str, probability: f64, trend: Trend) -> Self {
        Self {
            name: name.to_string(),
            probability,
            trend,
        }
    }

    /// Placeholder returned when there is nothing to sample from.
    pub fn general() -> Self {
        Self::new("General", 0.0, Trend::Low)
    }
}

/// Coarse weight bucket used to narrow the candidate topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityBand {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    pub fn matches(&self, probability: f64) -> bool {
        match self {
            ProbabilityBand::All => true,
            ProbabilityBand::High => probability >= 0.20,
            ProbabilityBand::Medium => (0.10..0.20).contains(&probability),
            ProbabilityBand::Low => probability < 0.10,
        }
    }
}
