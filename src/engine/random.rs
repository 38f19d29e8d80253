// src/engine/random.rs

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform floats in [0, 1).
///
/// All randomness of exam assembly goes through this trait so tests can
/// script exact outcomes.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn next_index(&mut self, n: usize) -> usize {
        let idx = (self.next_uniform() * n as f64).floor() as usize;
        idx.min(n - 1)
    }
}

/// Adapter over any `rand` generator.
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Entropy-seeded generator. Unlike `thread_rng` it is `Send`, so it can
    /// live inside an axum handler future.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, pos: 0 }
    }

    /// Number of values consumed so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}
