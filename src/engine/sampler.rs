// src/engine/sampler.rs

use crate::engine::random::RandomSource;
use crate::models::topic::{ProbabilityBand, Topic};

/// Narrows a subject's topics by weight band and keyword.
///
/// Each filter that leaves nothing behind is dropped and the full list is
/// used instead. The keyword match is a case-insensitive substring test on
/// the topic name taken as typed, surrounding whitespace included; an empty
/// keyword matches everything.
pub fn resolve_candidates<'a>(
    topics: &'a [Topic],
    band: ProbabilityBand,
    keyword: &str,
) -> Vec<&'a Topic> {
    let mut candidates: Vec<&Topic> = topics.iter().collect();

    if band != ProbabilityBand::All {
        candidates.retain(|t| band.matches(t.probability));
        if candidates.is_empty() {
            candidates = topics.iter().collect();
        }
    }

    let keyword = keyword.to_lowercase();
    if !keyword.is_empty() {
        candidates.retain(|t| t.name.to_lowercase().contains(&keyword));
        if candidates.is_empty() {
            // resets past the band filter too
            candidates = topics.iter().collect();
        }
    }

    candidates
}

/// Roulette-wheel selection, with replacement, over the candidates.
///
/// Weights are renormalized over the given subset. An empty list yields the
/// `General` placeholder topic.
pub fn pick_topic<R: RandomSource + ?Sized>(candidates: &[&Topic], rng: &mut R) -> Topic {
    let Some(last) = candidates.last() else {
        return Topic::general();
    };

    let total: f64 = candidates.iter().map(|t| t.probability).sum();
    let r = rng.next_uniform();
    let mut acc = 0.0;

    for topic in candidates {
        acc += topic.probability / total;
        if r <= acc {
            return (*topic).clone();
        }
    }

    // float drift
    (*last).clone()
}
