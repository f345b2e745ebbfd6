//! # Objective
//!
//! The function being maximized. Any `Fn(f64) -> f64` works; [`Quadratic`] covers the
//! usual `a·x² + b·x + c` case.
//!
//! ```rust
//! use bitga::objective::{Objective, Quadratic};
//!
//! let square = Quadratic::new(1.0, 0.0, 0.0);
//! assert_eq!(square.score(-3.0), 9.0);
//!
//! let shifted = |x: f64| 10.0 - (x - 2.0).abs();
//! assert_eq!(shifted.score(2.0), 10.0);
//! ```

/// A scalar function of the decoded value. Larger scores are better.
pub trait Objective {
    fn score(&self, x: f64) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn score(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `a·x² + b·x + c`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Objective for Quadratic {
    fn score(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}
