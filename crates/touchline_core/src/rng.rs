//! Random source port.
//!
//! Every probabilistic draw in the engine and the coach AIs goes through
//! [`RandomSource`], so a match is fully reproducible from its seed.
//! Production code uses [`SeededRandom`] (ChaCha8), tests can replay fixed
//! draws with [`ScriptedRandom`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform draw in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform draw in [lo, hi)
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniform integer in [lo, hi]
    fn range_inclusive(&mut self, lo: u16, hi: u16) -> u16 {
        if hi <= lo {
            return lo;
        }
        lo + self.index((hi - lo + 1) as usize) as u16
    }
}

/// Deterministic ChaCha8 source (same seed = same match)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f32>) -> Self {
        let draws = if draws.is_empty() { vec![0.5] } else { draws };
        Self { draws, cursor: 0 }
    }

    /// Always returns the same value.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_seeded_range() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
            let idx = rng.index(11);
            assert!(idx < 11);
            let extra = rng.range_inclusive(2, 5);
            assert!((2..=5).contains(&extra));
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f32(), 0.1);
        assert_eq!(rng.next_f32(), 0.9);
        assert_eq!(rng.next_f32(), 0.1);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_scripted_index_and_chance() {
        let mut rng = ScriptedRandom::constant(0.99);
        assert_eq!(rng.index(4), 3);
        assert!(!rng.chance(0.5));
        let mut low = ScriptedRandom::constant(0.0);
        assert_eq!(low.index(4), 0);
        assert!(low.chance(0.01));
        assert_eq!(low.range_inclusive(2, 5), 2);
    }
}
