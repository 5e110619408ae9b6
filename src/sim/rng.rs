//! Seeded randomness for world generation
//!
//! Generation code only sees the [`RandomSource`] trait so tests can script
//! exact draws. Sessions use [`SimRng`], a Pcg32 stream seeded once per run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the draws lane generation needs
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`. Callers guarantee `lo <= hi`.
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize {
        self.range_inclusive(0, len as i32 - 1) as usize
    }

    /// -1 or +1 with equal odds
    fn sign(&mut self) -> i32 {
        if self.range_inclusive(0, 1) == 0 { -1 } else { 1 }
    }
}

/// Deterministic PCG stream
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.random_range(lo..=hi)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn sign(&mut self) -> i32 {
        if self.rng.random_bool(0.5) { 1 } else { -1 }
    }
}

/// Replays a fixed list of draws, clamped into the requested range.
/// Once the script runs out every draw returns `lo`.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRng {
    draws: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(draws: &[i32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        self.draws.pop_front().unwrap_or(lo).clamp(lo, hi)
    }
}
