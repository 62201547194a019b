//! Randomness for card effects and deck handling.
//!
//! Everything random in the engine goes through the [`RandomSource`] trait:
//! risk/reward rolls, random discards, deck shuffles. The execution queue
//! owns one boxed source, so tests and replays substitute their own without
//! touching the components that roll.
//!
//! - [`GameRng`]: seeded ChaCha8, deterministic, with O(1) state capture
//! - [`ScriptedRng`]: replays a fixed list of rolls

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by components and rules.
pub trait RandomSource {
    /// Uniform integer in `1..=100`.
    fn roll_percent(&mut self) -> u32;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Fisher-Yates shuffle driven by `pick_index`.
    fn shuffle_len(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.pick_index(i + 1);
            order.swap(i, j);
        }
        order
    }
}

/// Deterministic RNG seeded from the engine config.
///
/// Uses ChaCha8 for speed while staying reproducible across platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll_percent(&mut self) -> u32 {
        self.inner.gen_range(1..=100)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how
/// many numbers were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

/// Replays scripted rolls, then falls back to a fixed value.
///
/// Picks always return `0` (front of the pile), so random discards and
/// shuffles become predictable too.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRng {
    /// Script the given rolls; once exhausted, every roll returns `fallback`.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// Always roll the same value.
    #[must_use]
    pub fn always(roll: u32) -> Self {
        Self::new([], roll)
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRng {
    fn roll_percent(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(self.fallback).clamp(1, 100)
    }

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_percent(), rng2.roll_percent());
        }
    }

    #[test]
    fn test_roll_percent_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let roll = rng.roll_percent();
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut order = rng.shuffle_len(10);
        assert_ne!(order, (0..10).collect::<Vec<_>>());
        order.sort_unstable();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            rng.roll_percent();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_percent()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_percent()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_scripted_rolls_then_fallback() {
        let mut rng = ScriptedRng::new([10, 90], 50);
        assert_eq!(rng.roll_percent(), 10);
        assert_eq!(rng.roll_percent(), 90);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.roll_percent(), 50);
        assert_eq!(rng.pick_index(5), 0);
    }

    #[test]
    fn test_scripted_shuffle_is_permutation() {
        let mut rng = ScriptedRng::always(1);
        let order = rng.shuffle_len(4);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}
