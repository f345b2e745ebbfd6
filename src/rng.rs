//! # Random sources
//!
//! The engine never owns its randomness. Every stochastic step pulls uniform values
//! in `[0, 1)` from a [`UniformSource`] in a fixed order, so a seeded source (or a
//! replayed list of draws) reproduces a run exactly.
//!
//! ## Example
//!
//! ```rust
//! use bitga::rng::{RandomNumberGenerator, UniformSource};
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let random_numbers = rng.fetch_uniform(5).unwrap();
//!
//! for number in random_numbers {
//!     assert!((0.0..1.0).contains(&number));
//! }
//! ```
//!
//! ## Replaying draws
//!
//! ```rust
//! use bitga::rng::{SequenceSource, UniformSource};
//!
//! let mut source = SequenceSource::new(vec![0.25, 0.75]);
//! assert_eq!(source.next_uniform().unwrap(), 0.25);
//! assert_eq!(source.next_index(4).unwrap(), 3);
//! assert!(source.next_uniform().is_err());
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

use crate::error::{GeneticError, Result};

/// A source of uniform random values in `[0, 1)`.
pub trait UniformSource {
    /// Returns the next uniform value.
    fn next_uniform(&mut self) -> Result<f64>;

    /// Returns the next integer in `[0, upper)`.
    ///
    /// The default maps one uniform draw onto the range.
    fn next_index(&mut self, upper: usize) -> Result<usize> {
        let u = self.next_uniform()?;
        Ok(((u * upper as f64) as usize).min(upper.saturating_sub(1)))
    }

    /// Returns `num` uniform values in draw order.
    fn fetch_uniform(&mut self, num: usize) -> Result<Vec<f64>> {
        (0..num).map(|_| self.next_uniform()).collect()
    }
}

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for RandomNumberGenerator {
    fn next_uniform(&mut self) -> Result<f64> {
        Ok(self.rng.gen::<f64>())
    }

    fn next_index(&mut self, upper: usize) -> Result<usize> {
        if upper == 0 {
            return Err(GeneticError::RandomGeneration(
                "Cannot draw an index from an empty range".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..upper))
    }
}

/// Replays a fixed list of draws, then fails once it runs dry.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    draws: VecDeque<f64>,
    consumed: usize,
}

impl SequenceSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of draws still queued.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> Result<f64> {
        let value = self.draws.pop_front().ok_or_else(|| {
            GeneticError::RandomGeneration(format!(
                "Draw sequence exhausted after {} values",
                self.consumed
            ))
        })?;
        self.consumed += 1;
        Ok(value)
    }
}

fn check_unit(u: f64) -> Result<f64> {
    if (0.0..1.0).contains(&u) {
        Ok(u)
    } else {
        Err(GeneticError::RandomGeneration(format!(
            "Random draw {} lies outside [0, 1)",
            u
        )))
    }
}

/// Pulls one draw and rejects values outside `[0, 1)`.
pub(crate) fn draw<R: UniformSource + ?Sized>(rng: &mut R) -> Result<f64> {
    check_unit(rng.next_uniform()?)
}

/// Pulls `num` draws and rejects any value outside `[0, 1)`.
pub(crate) fn draws<R: UniformSource + ?Sized>(rng: &mut R, num: usize) -> Result<Vec<f64>> {
    let values = rng.fetch_uniform(num)?;
    values.into_iter().map(check_unit).collect()
}

/// Pulls one index and rejects values outside `[0, upper)`.
pub(crate) fn draw_index<R: UniformSource + ?Sized>(rng: &mut R, upper: usize) -> Result<usize> {
    let index = rng.next_index(upper)?;
    if index < upper {
        Ok(index)
    } else {
        Err(GeneticError::RandomGeneration(format!(
            "Random index {} lies outside [0, {})",
            index, upper
        )))
    }
}
