//! Randomness capability for distractor sampling and option shuffling.
//!
//! The engine never reaches for a process-wide generator. Callers hand it a
//! [`RandomSource`], which is either backed by a real `rand` generator
//! ([`RngSource`]) or, in tests, by a scripted sequence of picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..upper`. Callers never pass `upper == 0`.
    fn below(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, upper: usize) -> usize {
        self.0.random_range(0..upper)
    }
}

/// Unbiased in-place Fisher–Yates shuffle.
///
/// Walks from the last slot down to 1, swapping slot `i` with a uniformly
/// chosen slot in `0..=i`.
pub fn shuffle<T, R>(items: &mut [T], random: &mut R)
where
    R: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = random.below(i + 1);
        items.swap(i, j);
    }
}

/// Replays a fixed list of picks, clamped to the requested range.
///
/// Once the script runs out every call returns `upper - 1`, which makes
/// [`shuffle`] a no-op and always samples the last element.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    picks: std::collections::VecDeque<usize>,
    pub calls: Vec<usize>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: usize) -> usize {
        self.calls.push(upper);
        match self.picks.pop_front() {
            Some(pick) => pick.min(upper - 1),
            None => upper - 1,
        }
    }
}
