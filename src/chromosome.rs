//! # Chromosome
//!
//! A `Chromosome` is a fixed-length bit string, most significant bit first. It is
//! the genotype of one individual: an [`Encoder`](crate::encoding::Encoder) maps its
//! unsigned integer value onto a real number inside the search interval.
//!
//! ## Example
//!
//! ```rust
//! use bitga::chromosome::Chromosome;
//!
//! let left: Chromosome = "110000".parse().unwrap();
//! let right: Chromosome = "001111".parse().unwrap();
//!
//! let (a, b) = left.crossover(&right, 2).unwrap();
//! assert_eq!(a.to_string(), "111111");
//! assert_eq!(b.to_string(), "000000");
//! assert_eq!(a.value(), 63);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Builds the `len`-bit big-endian representation of `value`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `value` needs more than `len` bits.
    pub fn from_value(value: u64, len: usize) -> Result<Self> {
        let fits = len >= 64 || value < (1u64 << len);
        if !fits {
            return Err(GeneticError::OutOfBounds(format!(
                "Value {} does not fit in {} bits",
                value, len
            )));
        }
        let bits = (0..len)
            .rev()
            .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
            .collect();
        Ok(Self { bits })
    }

    /// Builds a chromosome from one draw per bit; a bit is set when its draw exceeds 0.5.
    pub fn from_draws(draws: &[f64]) -> Self {
        Self {
            bits: draws.iter().map(|&u| u > 0.5).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The unsigned integer the bits spell, most significant bit first.
    pub fn value(&self) -> u64 {
        self.bits
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    /// Single-point crossover.
    ///
    /// The first child takes `self[..point]` and `other[point..]`, the second child
    /// takes `other[..point]` and `self[point..]`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the parents differ in length and `OutOfBounds` if
    /// `point` is past the end.
    pub fn crossover(&self, other: &Self, point: usize) -> Result<(Self, Self)> {
        if self.len() != other.len() {
            return Err(GeneticError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        if point > self.len() {
            return Err(GeneticError::OutOfBounds(format!(
                "Crossover point {} exceeds chromosome length {}",
                point,
                self.len()
            )));
        }

        let first = self.bits[..point]
            .iter()
            .chain(&other.bits[point..])
            .copied()
            .collect();
        let second = other.bits[..point]
            .iter()
            .chain(&self.bits[point..])
            .copied()
            .collect();

        Ok((Self { bits: first }, Self { bits: second }))
    }

    /// Flips every bit whose draw falls below `probability`; returns whether any bit changed.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` unless there is exactly one draw per bit.
    pub fn mutate(&mut self, draws: &[f64], probability: f64) -> Result<bool> {
        if draws.len() != self.len() {
            return Err(GeneticError::LengthMismatch {
                expected: self.len(),
                found: draws.len(),
            });
        }

        let mut changed = false;
        for (bit, &u) in self.bits.iter_mut().zip(draws) {
            if u < probability {
                *bit = !*bit;
                changed = true;
            }
        }
        Ok(changed)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Chromosome {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GeneticError::InvalidChromosome(format!(
                    "unexpected character {:?} in {:?}",
                    other, s
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}
