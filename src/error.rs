//! # Error Types
//!
//! This module defines the error type shared by every stage of the binary genetic
//! algorithm. Configuration problems are caught before evolution starts, numerical
//! degeneracy is reported by the selector, and broken random sources fail fast.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bitga::error::{GeneticError, Result};
//!
//! fn check_interval(left: f64, right: f64) -> Result<()> {
//!     if left >= right {
//!         return Err(GeneticError::Configuration(
//!             "Interval left bound must be below the right bound".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_interval(0.0, 1.0).is_ok());
//! assert!(check_interval(1.0, 0.0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use bitga::error::{GeneticError, OptionExt};
//!
//! fn first_fitness(fitness: &[f64]) -> bitga::error::Result<f64> {
//!     fitness.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the genetic algorithm.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The population's fitness sums to zero or less, so fitness-proportionate
    /// probabilities are undefined.
    #[error("Non-positive total fitness: {total}")]
    NonPositiveTotalFitness { total: f64 },

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when the random source misbehaves.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// Error that occurs when a value cannot be represented inside the search interval.
    #[error("Bounds error: {0}")]
    OutOfBounds(String),

    /// Error that occurs when two chromosomes or a chromosome and its encoder disagree on length.
    #[error("Chromosome length mismatch: expected {expected} bits, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Error that occurs when text cannot be parsed into a chromosome.
    #[error("Invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use bitga::error::ResultExt;
///
/// fn parse_generations(text: &str) -> bitga::error::Result<usize> {
///     text.parse::<usize>().context("Failed to parse generation count")
/// }
///
/// assert!(parse_generations("12").is_ok());
/// assert!(parse_generations("twelve").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn` for `None`.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
