// src/catalog.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    question::{Difficulty, MockQuestion},
    topic::{Topic, Trend},
};

/// Read-only reference data: official question counts per exam board,
/// weighted topics per subject and the mock question bank.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// exam board -> subject -> official question count
    pub official_counts: BTreeMap<String, BTreeMap<String, usize>>,

    /// subject -> weighted topics, in display order
    pub topics: BTreeMap<String, Vec<Topic>>,

    #[serde(default)]
    pub questions: Vec<MockQuestion>,
}

impl Catalog {
    /// Loads a catalog from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks topic weights and the shape of every mock question.
    pub fn validate(&self) -> Result<(), String> {
        for (subject, topics) in &self.topics {
            for topic in topics {
                if !(topic.probability > 0.0 && topic.probability <= 1.0) {
                    return Err(format!(
                        "topic '{}' of '{}' has weight {} outside (0, 1]",
                        topic.name, subject, topic.probability
                    ));
                }
            }
        }

        for (idx, question) in self.questions.iter().enumerate() {
            question
                .validate()
                .map_err(|e| format!("mock question #{} is invalid: {}", idx, e))?;
        }

        Ok(())
    }

    /// Subject names, sorted.
    pub fn subjects(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    /// Exam board identifiers, sorted.
    pub fn exam_boards(&self) -> Vec<String> {
        self.official_counts.keys().cloned().collect()
    }

    pub fn official_count(&self, exam_board: &str, subject: &str) -> Option<usize> {
        self.official_counts
            .get(exam_board)
            .and_then(|counts| counts.get(subject))
            .copied()
    }

    /// Topics of a subject; empty for unknown subjects.
    pub fn topics_for(&self, subject: &str) -> &[Topic] {
        self.topics.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_question(&self, subject: &str, topic: &str) -> Option<&MockQuestion> {
        self.questions
            .iter()
            .find(|q| q.subject == subject && q.topic == topic)
    }

    /// The tables shipped with the service.
    pub fn builtin() -> Self {
        Self {
            official_counts: builtin_official_counts(),
            topics: builtin_topics(),
            questions: builtin_questions(),
        }
    }
}

fn counts(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
    entries
        .iter()
        .map(|(subject, n)| (subject.to_string(), *n))
        .collect()
}

fn builtin_official_counts() -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut boards = BTreeMap::new();

    // 180 questions, 45 per area
    boards.insert(
        "ENEM".to_string(),
        counts(&[
            ("Mathematics", 45),
            ("Portuguese Language", 25),
            ("Literature", 8),
            ("English", 5),
            ("Spanish", 5),
            ("Arts", 4),
            ("History", 15),
            ("Geography", 15),
            ("Philosophy", 7),
            ("Sociology", 8),
            ("Biology", 15),
            ("Physics", 15),
            ("Chemistry", 15),
        ]),
    );

    // first phase, 90 questions
    boards.insert(
        "FUVEST".to_string(),
        counts(&[
            ("Mathematics", 10),
            ("Portuguese Language", 10),
            ("Literature", 10),
            ("English", 10),
            ("History", 10),
            ("Geography", 10),
            ("Biology", 10),
            ("Physics", 10),
            ("Chemistry", 10),
        ]),
    );

    // first phase, 72 questions; Portuguese and Literature share 12
    boards.insert(
        "UNICAMP".to_string(),
        counts(&[
            ("Portuguese Language", 12),
            ("Literature", 12),
            ("Mathematics", 12),
            ("English", 7),
            ("Chemistry", 7),
            ("Physics", 7),
            ("Biology", 7),
            ("History", 7),
            ("Geography", 7),
            ("Philosophy", 3),
            ("Sociology", 3),
        ]),
    );

    // 90 questions, 30 per area
    boards.insert(
        "UNESP (VUNESP)".to_string(),
        counts(&[
            ("Mathematics", 8),
            ("Portuguese Language", 12),
            ("Literature", 6),
            ("English", 6),
            ("Arts", 6),
            ("History", 10),
            ("Geography", 10),
            ("Philosophy", 5),
            ("Sociology", 5),
            ("Biology", 7),
            ("Physics", 7),
            ("Chemistry", 8),
        ]),
    );

    // qualification exam, 60 questions
    boards.insert(
        "UERJ".to_string(),
        counts(&[
            ("Mathematics", 15),
            ("Portuguese Language", 8),
            ("Literature", 7),
            ("Foreign Language", 5),
            ("History", 5),
            ("Geography", 5),
            ("Philosophy", 2),
            ("Sociology", 3),
            ("Biology", 5),
            ("Physics", 5),
            ("Chemistry", 5),
        ]),
    );

    boards
}

fn builtin_topics() -> BTreeMap<String, Vec<Topic>> {
    use Trend::*;

    let table: Vec<(&str, Vec<(&str, f64, Trend)>)> = vec![
        (
            "Mathematics",
            vec![
                ("Plane and Solid Geometry", 0.22, VeryHigh),
                ("Functions and Graphs", 0.18, High),
                ("Statistics and Probability", 0.16, VeryHigh),
                ("Arithmetic, Ratio and Proportion", 0.15, High),
                ("Financial Mathematics", 0.10, Medium),
                ("Trigonometry", 0.08, Medium),
                ("Logarithms", 0.06, Low),
                ("Combinatorics", 0.05, Medium),
            ],
        ),
        (
            "Physics",
            vec![
                ("Mechanics (Kinematics/Dynamics)", 0.30, VeryHigh),
                ("Electrodynamics", 0.20, High),
                ("Thermology", 0.15, High),
                ("Waves", 0.15, High),
                ("Optics", 0.10, Medium),
                ("Modern Physics", 0.05, Low),
            ],
        ),
        (
            "Chemistry",
            vec![
                ("Physical Chemistry (Thermo/Kinetics/Equilibrium)", 0.25, High),
                ("Organic Chemistry (Reactions/Functions)", 0.25, VeryHigh),
                ("Stoichiometry", 0.15, High),
                ("Chemical Bonds and Interactions", 0.15, Medium),
                ("Environmental Chemistry", 0.10, High),
                ("Solutions", 0.10, Medium),
            ],
        ),
        (
            "Biology",
            vec![
                ("Ecology and Environment", 0.30, VeryHigh),
                ("Genetics and Biotechnology", 0.15, High),
                ("Human Physiology", 0.15, High),
                ("Cytology", 0.12, Medium),
                ("Evolution", 0.10, Medium),
                ("Botany", 0.08, Low),
                ("Zoology/Parasitology", 0.10, Medium),
            ],
        ),
        (
            "History",
            vec![
                ("Brazil: Second Reign", 0.15, High),
                ("Brazil: Vargas Era", 0.15, High),
                ("Brazil: Military Dictatorship", 0.12, High),
                ("Brazil: Colonial System", 0.10, Medium),
                ("General: Contemporary Age (Wars)", 0.15, High),
                ("General: Classical Antiquity", 0.08, Low),
                ("Heritage and Culture", 0.10, High),
            ],
        ),
        (
            "Geography",
            vec![
                ("Agrarian Geography", 0.15, High),
                ("Urban Geography", 0.15, High),
                ("Geopolitics and Globalization", 0.15, VeryHigh),
                ("Environment and Climate", 0.20, VeryHigh),
                ("Physical Geography (Relief/Hydrography)", 0.15, Medium),
                ("Demography", 0.10, Medium),
            ],
        ),
        (
            "Portuguese Language",
            vec![
                ("Text Interpretation", 0.40, VeryHigh),
                ("Text Genres", 0.20, High),
                ("Linguistic Variation", 0.15, High),
                ("Grammar in Context", 0.15, Medium),
                ("Functions of Language", 0.10, Medium),
            ],
        ),
        (
            "Literature",
            vec![
                ("Modernism", 0.30, VeryHigh),
                ("Romanticism", 0.20, High),
                ("Realism/Naturalism", 0.20, High),
                ("Contemporary Literature", 0.15, High),
                ("Baroque/Arcadianism", 0.10, Low),
            ],
        ),
        (
            "Philosophy",
            vec![
                ("Ancient Philosophy (Greece)", 0.25, High),
                ("Political Philosophy", 0.25, High),
                ("Ethics and Morals", 0.20, High),
                ("Theory of Knowledge", 0.15, Medium),
                ("Contemporary Philosophy", 0.15, Medium),
            ],
        ),
        (
            "Sociology",
            vec![
                ("World of Work", 0.25, High),
                ("Culture and Culture Industry", 0.20, High),
                ("Social Movements", 0.20, High),
                ("Social Inequality", 0.20, VeryHigh),
                ("Power, State and Politics", 0.15, Medium),
            ],
        ),
        (
            "English",
            vec![
                ("Text Interpretation (Journalistic)", 0.40, VeryHigh),
                ("Text Interpretation (Literary/Music)", 0.30, High),
                ("Vocabulary in Context", 0.20, Medium),
                ("Connectives and Reference", 0.10, Medium),
            ],
        ),
        (
            "Spanish",
            vec![
                ("Text Interpretation", 0.50, VeryHigh),
                ("False Cognates", 0.20, High),
                ("Grammar in Context", 0.30, Medium),
            ],
        ),
        (
            "Arts",
            vec![
                ("Contemporary Art", 0.40, VeryHigh),
                ("European Avant-gardes", 0.30, High),
                ("Brazilian Art", 0.20, Medium),
                ("Music and Popular Culture", 0.10, Medium),
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(subject, topics)| {
            let topics = topics
                .into_iter()
                .map(|(name, p, trend)| Topic::new(name, p, trend))
                .collect();
            (subject.to_string(), topics)
        })
        .collect()
}

fn options(items: [&str; 5]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_questions() -> Vec<MockQuestion> {
    vec![
        MockQuestion {
            subject: "Mathematics".to_string(),
            prompt: "An investor applies R$ 1,000.00 at 10% monthly compound interest. What is the amount after 2 months?".to_string(),
            options: options(["R$ 1,200.00", "R$ 1,210.00", "R$ 1,100.00", "R$ 1,220.00", "R$ 1,150.00"]),
            correct_option_index: 1,
            explanation: "M = C * (1 + i)^t = 1000 * (1.1)^2 = 1000 * 1.21 = 1210.".to_string(),
            difficulty: Some(Difficulty::Easy),
            topic: "Financial Mathematics".to_string(),
            source: "AI Simulation".to_string(),
            year: 2024,
        },
        MockQuestion {
            subject: "Physics".to_string(),
            prompt: "A car travels 100 km in 2 hours. What is its average speed?".to_string(),
            options: options(["20 km/h", "40 km/h", "50 km/h", "60 km/h", "100 km/h"]),
            correct_option_index: 2,
            explanation: "Vm = ΔS / Δt = 100 / 2 = 50 km/h.".to_string(),
            difficulty: Some(Difficulty::Easy),
            topic: "Mechanics (Kinematics/Dynamics)".to_string(),
            source: "AI Simulation".to_string(),
            year: 2023,
        },
        MockQuestion {
            subject: "History".to_string(),
            prompt: "The French Revolution (1789) had the Storming of the Bastille as one of its landmarks. What was the revolutionaries' motto?".to_string(),
            options: options([
                "Order and Progress",
                "Liberty, Equality, Fraternity",
                "Peace, Land and Bread",
                "God, Homeland and Family",
                "Win or Die",
            ]),
            correct_option_index: 1,
            explanation: "\"Liberté, Égalité, Fraternité\" became the symbol of the French Republic and of Enlightenment ideals.".to_string(),
            difficulty: Some(Difficulty::Medium),
            topic: "French Revolution".to_string(),
            source: "ENEM 2022".to_string(),
            year: 2022,
        },
        MockQuestion {
            subject: "Biology".to_string(),
            prompt: "Which cell organelle produces energy (ATP) through cellular respiration?".to_string(),
            options: options(["Ribosome", "Golgi apparatus", "Mitochondrion", "Lysosome", "Chloroplast"]),
            correct_option_index: 2,
            explanation: "Mitochondria are the cell's power plants, running the Krebs cycle and the respiratory chain.".to_string(),
            difficulty: None,
            topic: "Cytology".to_string(),
            source: "FUVEST 2023".to_string(),
            year: 2023,
        },
        MockQuestion {
            subject: "Geography".to_string(),
            prompt: "Regarding climate trends for 2025, which phenomenon is most likely to influence rainfall in Brazil?".to_string(),
            options: options([
                "La Niña",
                "El Niño",
                "Monsoons",
                "Extratropical cyclones",
                "Stationary cold fronts",
            ]),
            correct_option_index: 0,
            explanation: "Climate models for 2025 point to a transition to La Niña, which shifts rainfall, especially in the South and Northeast.".to_string(),
            difficulty: Some(Difficulty::Medium),
            topic: "Climatology".to_string(),
            source: "Mock Exam 2025".to_string(),
            year: 2025,
        },
    ]
}
