//! # Encoder
//!
//! Quantizes the search interval `[left, right]` into `2^bit_number` steps of width
//! `disc` and converts between real values and [`Chromosome`]s.
//!
//! `bit_number` is the smallest bit count whose resolution beats the requested
//! number of decimal places: `ceil(|log2((right - left) * 10^precision)|)`.
//!
//! ## Example
//!
//! ```rust
//! use bitga::encoding::Encoder;
//!
//! let encoder = Encoder::new(-10.0, 10.0, 4).unwrap();
//! assert_eq!(encoder.bit_number(), 18);
//!
//! let chromosome = encoder.encode(1.5).unwrap();
//! assert_eq!(chromosome.len(), 18);
//! assert!((encoder.decode(&chromosome).unwrap() - 1.5).abs() <= encoder.disc());
//! ```

use crate::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
};

/// Largest supported chromosome length; indices are held in a `u64`.
pub const MAX_BIT_NUMBER: usize = 63;

/// Relative slack used to snap `(x - left) / disc` onto the nearest index when
/// rounding noise leaves it a hair below an integer.
const INDEX_SNAP_EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Encoder {
    left: f64,
    right: f64,
    bit_number: usize,
    disc: f64,
}

impl Encoder {
    /// Derives the resolution for `[left, right]` at `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the bounds are not finite, `left >= right`,
    /// or the resolution would need more than [`MAX_BIT_NUMBER`] bits.
    pub fn new(left: f64, right: f64, precision: u32) -> Result<Self> {
        if !left.is_finite() || !right.is_finite() {
            return Err(GeneticError::Configuration(format!(
                "Interval bounds must be finite, got [{}, {}]",
                left, right
            )));
        }
        if left >= right {
            return Err(GeneticError::Configuration(format!(
                "Interval left bound {} must be below the right bound {}",
                left, right
            )));
        }

        let steps = (right - left) * 10f64.powi(precision as i32);
        let bits = steps.log2().abs().ceil();
        if !bits.is_finite() || bits > MAX_BIT_NUMBER as f64 {
            return Err(GeneticError::Configuration(format!(
                "Interval [{}, {}] at precision {} needs more than {} bits",
                left, right, precision, MAX_BIT_NUMBER
            )));
        }
        let bit_number = (bits as usize).max(1);
        let disc = (right - left) / 2f64.powi(bit_number as i32);

        Ok(Self {
            left,
            right,
            bit_number,
            disc,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    /// Chromosome length for this interval and precision.
    pub fn bit_number(&self) -> usize {
        self.bit_number
    }

    /// Quantization step between consecutive indices.
    pub fn disc(&self) -> f64 {
        self.disc
    }

    /// Largest quantization index, `2^bit_number - 1`.
    pub fn max_index(&self) -> u64 {
        (1u64 << self.bit_number) - 1
    }

    /// Maps a chromosome onto `left + value * disc`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the chromosome is not `bit_number` bits long.
    pub fn decode(&self, chromosome: &Chromosome) -> Result<f64> {
        self.check_length(chromosome)?;
        Ok(self.position(chromosome))
    }

    /// Same mapping as [`decode`](Self::decode) without the length check.
    pub fn position(&self, chromosome: &Chromosome) -> f64 {
        self.left + chromosome.value() as f64 * self.disc
    }

    /// Quantizes `x` to `floor((x - left) / disc)` and renders it in `bit_number` bits.
    ///
    /// `x == right` maps to the top index.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x` is not finite or lies outside `[left, right]`.
    pub fn encode(&self, x: f64) -> Result<Chromosome> {
        if !x.is_finite() || x < self.left || x > self.right {
            return Err(GeneticError::OutOfBounds(format!(
                "{} lies outside [{}, {}]",
                x, self.left, self.right
            )));
        }

        let scaled = (x - self.left) / self.disc;
        let nearest = scaled.round();
        let index = if (nearest - scaled).abs() <= INDEX_SNAP_EPSILON * nearest.max(1.0) {
            nearest
        } else {
            scaled.floor()
        };

        let index = (index as u64).min(self.max_index());
        Chromosome::from_value(index, self.bit_number)
    }

    /// Rejects chromosomes whose length differs from `bit_number`.
    pub fn check_length(&self, chromosome: &Chromosome) -> Result<()> {
        if chromosome.len() != self.bit_number {
            return Err(GeneticError::LengthMismatch {
                expected: self.bit_number,
                found: chromosome.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_number_for_reference_interval() {
        let encoder = Encoder::new(-10.0, 10.0, 4).unwrap();
        assert_eq!(encoder.bit_number(), 18);
        assert_eq!(encoder.disc(), 20.0 / 262_144.0);
        assert_eq!(encoder.max_index(), 262_143);
    }

    #[test]
    fn test_bit_number_small_ranges() {
        // 0.5 * 10^0 = 0.5, |log2| = 1
        assert_eq!(Encoder::new(0.0, 0.5, 0).unwrap().bit_number(), 1);
        // 1 * 10^0 = 1, log2 = 0, clamped to one bit
        assert_eq!(Encoder::new(0.0, 1.0, 0).unwrap().bit_number(), 1);
        // 3 * 10^2 = 300, log2 ~ 8.23
        assert_eq!(Encoder::new(-1.0, 2.0, 2).unwrap().bit_number(), 9);
    }

    #[test]
    fn test_rejects_bad_intervals() {
        assert!(matches!(
            Encoder::new(1.0, 1.0, 2),
            Err(GeneticError::Configuration(_))
        ));
        assert!(Encoder::new(2.0, 1.0, 2).is_err());
        assert!(Encoder::new(f64::NEG_INFINITY, 1.0, 2).is_err());
        assert!(Encoder::new(0.0, 1.0, 30).is_err());
    }

    #[test]
    fn test_decode_bounds() {
        let encoder = Encoder::new(-10.0, 10.0, 4).unwrap();
        let low = Chromosome::from_value(0, 18).unwrap();
        let high = Chromosome::from_value(encoder.max_index(), 18).unwrap();
        assert_eq!(encoder.decode(&low).unwrap(), -10.0);
        assert!((encoder.decode(&high).unwrap() - (10.0 - encoder.disc())).abs() < 1e-12);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let encoder = Encoder::new(-10.0, 10.0, 4).unwrap();
        let short = Chromosome::from_value(3, 4).unwrap();
        assert!(matches!(
            encoder.decode(&short),
            Err(GeneticError::LengthMismatch {
                expected: 18,
                found: 4
            })
        ));
    }

    #[test]
    fn test_round_trip_over_indices() {
        let encoder = Encoder::new(-10.0, 10.0, 4).unwrap();
        let max = encoder.max_index();
        let samples = (0..2000u64)
            .map(|i| i * 131)
            .chain([0, 1, max / 2, max - 1, max]);

        for index in samples.filter(|&i| i <= max) {
            let bits = Chromosome::from_value(index, encoder.bit_number()).unwrap();
            let x = encoder.decode(&bits).unwrap();
            assert_eq!(encoder.encode(x).unwrap(), bits, "index {index}");
        }
    }

    #[test]
    fn test_round_trip_awkward_interval() {
        let encoder = Encoder::new(-0.3, 1.7, 3).unwrap();
        for index in 0..=encoder.max_index() {
            let bits = Chromosome::from_value(index, encoder.bit_number()).unwrap();
            let x = encoder.decode(&bits).unwrap();
            assert_eq!(encoder.encode(x).unwrap(), bits, "index {index}");
        }
    }

    #[test]
    fn test_encode_floors_between_steps() {
        let encoder = Encoder::new(0.0, 8.0, 0).unwrap();
        // 8 * 10^0 = 8 -> 3 bits, disc = 1
        assert_eq!(encoder.bit_number(), 3);
        assert_eq!(encoder.encode(2.7).unwrap().to_string(), "010");
        assert_eq!(encoder.encode(8.0).unwrap().to_string(), "111");
    }

    #[test]
    fn test_encode_rejects_outside_interval() {
        let encoder = Encoder::new(0.0, 8.0, 0).unwrap();
        assert!(matches!(
            encoder.encode(-0.1),
            Err(GeneticError::OutOfBounds(_))
        ));
        assert!(encoder.encode(8.5).is_err());
        assert!(encoder.encode(f64::NAN).is_err());
    }
}
