//! # Seeded Random Stream
//!
//! Uniform draws for the non-spatial decisions of generation: counts,
//! placement attempts, jitter. Spatially coherent values come from
//! [`NoiseField`](crate::noise::NoiseField) instead.
//!
//! The phrase is hashed to a 32-bit [`WorldSeed`], which seeds a `ChaCha8`
//! stream. Same phrase, same sequence.

use rand::{Rng as _, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::noise::WorldSeed;

/// Deterministic uniform random generator keyed by a seed phrase.
#[derive(Clone, Debug)]
pub struct Rng {
    inner: ChaCha8Rng,
}

impl Rng {
    /// Creates a stream from a seed phrase.
    #[must_use]
    pub fn new(phrase: &str) -> Self {
        Self::from_seed(WorldSeed::from_phrase(phrase))
    }

    /// Creates a stream from an already-hashed seed.
    #[must_use]
    pub fn from_seed(seed: WorldSeed) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(u64::from(seed.value())),
        }
    }

    /// Next uniform value in `[0, 1)`.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform value in `[a, b)`.
    #[inline]
    pub fn range(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.next()
    }

    /// Uniform integer in `[a, b]`, inclusive on both ends.
    ///
    /// An inverted range collapses to `a`.
    pub fn irange(&mut self, a: i64, b: i64) -> i64 {
        if b <= a {
            return a;
        }
        let span = (b - a + 1) as f64;
        let offset = (self.next() * span).floor() as i64;
        (a + offset).min(b)
    }

    /// Picks a uniformly random element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.irange(0, items.len() as i64 - 1) as usize;
        items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_phrase_same_sequence() {
        let mut a = Rng::new("harbor");
        let mut b = Rng::new("harbor");
        for _ in 0..1000 {
            assert_eq!(a.next(), b.next(), "Streams should be identical");
        }
    }

    #[test]
    fn test_empty_phrase_is_valid() {
        let mut rng = Rng::new("");
        for _ in 0..100 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_uniform_mean() {
        let mut rng = Rng::new("uniformity");
        let n = 20_000;
        let sum: f64 = (0..n).map(|_| rng.range(0.0, 1.0)).sum();
        let mean = sum / f64::from(n);
        assert!((mean - 0.5).abs() < 0.01, "Mean {mean} too far from 0.5");
    }

    #[test]
    fn test_no_short_period() {
        let mut rng = Rng::new("period");
        let draws: Vec<u64> = (0..10_000).map(|_| rng.next().to_bits()).collect();
        let unique: HashSet<u64> = draws.iter().copied().collect();
        assert!(
            unique.len() > 9_990,
            "Stream repeats too often: {} unique of 10000",
            unique.len()
        );
    }

    #[test]
    fn test_irange_inclusive_bounds() {
        let mut rng = Rng::new("irange");
        let mut seen = [false; 5];
        for _ in 0..2000 {
            let v = rng.irange(2, 6);
            assert!((2..=6).contains(&v), "irange out of bounds: {v}");
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "Every value in [2, 6] should appear");
        assert_eq!(rng.irange(4, 4), 4);
        assert_eq!(rng.irange(7, 3), 7);
    }

    #[test]
    fn test_pick() {
        let mut rng = Rng::new("pick");
        let items = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(items.contains(rng.pick(&items).unwrap()));
        }
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
    }
}
