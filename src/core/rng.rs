//! Deterministic, injectable randomness.
//!
//! The engine never touches ambient randomness. Every random decision goes
//! through a [`RandomSource`] handed to the match at construction:
//!
//! - Emoji draws for the upcoming mover
//! - The power-up offer roll and the choice of power-up
//!
//! Each decision names a [`RandomStream`] so emoji draws and power-up rolls
//! can come from independent sequences. [`MatchRng`] is the default source:
//! one ChaCha8 stream per purpose, derived from a single seed.
//!
//! ```
//! use blink_tac_toe::core::{MatchRng, RandomSource, RandomStream};
//!
//! let mut a = MatchRng::new(42);
//! let mut b = MatchRng::new(42);
//!
//! // Same seed, same draws
//! assert_eq!(a.pick(RandomStream::Emoji, 9), b.pick(RandomStream::Emoji, 9));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Which random decision is being made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RandomStream {
    /// Drawing the next emoji from a player's category.
    Emoji,
    /// Rolling for and choosing a power-up.
    PowerUp,
}

/// Source of every random decision the engine makes.
///
/// Implementations must be deterministic for a given construction so
/// matches can be replayed in tests.
pub trait RandomSource {
    /// Pick an index uniformly from `0..len`. `len` is never zero.
    fn pick(&mut self, stream: RandomStream, len: usize) -> usize;

    /// Return true with the given probability. Drawn from the power-up stream.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Deterministic ChaCha8 generator.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
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

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);

        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    ///
    /// The probability is clamped to `0.0..=1.0`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Default random source: one [`GameRng`] per [`RandomStream`].
#[derive(Clone, Debug)]
pub struct MatchRng {
    emoji: GameRng,
    power_up: GameRng,
}

impl MatchRng {
    /// Derive both streams from one seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let root = GameRng::new(seed);
        Self {
            emoji: root.for_context("emoji"),
            power_up: root.for_context("power-up"),
        }
    }

    fn stream(&mut self, stream: RandomStream) -> &mut GameRng {
        match stream {
            RandomStream::Emoji => &mut self.emoji,
            RandomStream::PowerUp => &mut self.power_up,
        }
    }
}

impl RandomSource for MatchRng {
    fn pick(&mut self, stream: RandomStream, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty set");
        self.stream(stream).gen_range_usize(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.power_up.gen_bool(probability)
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, _stream: RandomStream, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty set");
        self.gen_range_usize(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen_bool(probability)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, stream: RandomStream, len: usize) -> usize {
        (**self).pick(stream, len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
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
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("emoji");
        let mut ctx2 = rng.for_context("power-up");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_streams_are_independent() {
        let mut plain = MatchRng::new(7);
        let mut interleaved = MatchRng::new(7);

        let expected: Vec<_> = (0..20).map(|_| plain.pick(RandomStream::Emoji, 9)).collect();
        let actual: Vec<_> = (0..20)
            .map(|_| {
                interleaved.chance(0.5);
                interleaved.pick(RandomStream::PowerUp, 4);
                interleaved.pick(RandomStream::Emoji, 9)
            })
            .collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut rng = MatchRng::new(3);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick(RandomStream::Emoji, len) < len);
            }
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(9);
        for _ in 0..50 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    #[should_panic(expected = "cannot pick from an empty set")]
    fn test_pick_empty_panics() {
        MatchRng::new(1).pick(RandomStream::Emoji, 0);
    }
}
