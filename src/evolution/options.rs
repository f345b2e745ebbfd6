//! # GaOptions
//!
//! The `GaOptions` struct holds every parameter of a run: population size, search
//! interval, objective coefficients, decimal precision, crossover and mutation
//! probabilities (both in percent), and the number of generations. It also carries
//! the engine's logging level, the policy for degenerate fitness totals and an
//! optional seed.
//!
//! ## Example
//!
//! ```rust
//! use bitga::evolution::options::{GaOptions, LogLevel};
//!
//! // The defaults reproduce the classic x² on [-10, 10] run
//! let default_options = GaOptions::default();
//! assert_eq!(default_options.get_population_size(), 3);
//!
//! let custom_options = GaOptions::builder()
//!     .population_size(20)
//!     .interval(-1.0, 2.0)
//!     .coefficients(-1.0, 1.0, 2.0)
//!     .precision(6)
//!     .crossover_probability(25.0)
//!     .mutation_probability(1.0)
//!     .generations(50)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//! assert!(custom_options.validate().is_ok());
//! ```
//!
//! ## `LogLevel`
//!
//! - `Verbose`: every checkpoint of every generation is traced at `debug`.
//! - `Minimal`: one `info` line per generation.
//! - `None`: the engine emits no progress events.

use crate::{
    error::{GeneticError, Result},
    objective::Quadratic,
    rng::RandomNumberGenerator,
    selection::DegeneratePolicy,
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaOptions {
    population_size: usize,
    left: f64,
    right: f64,
    coefficients: Quadratic,
    precision: u32,
    /// Percent, `0..=100`.
    crossover_probability: f64,
    /// Percent per bit, `0..=100`.
    mutation_probability: f64,
    generations: usize,
    log_level: LogLevel,
    degenerate_policy: DegeneratePolicy,
    seed: Option<u64>,
}

impl GaOptions {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        population_size: usize,
        left: f64,
        right: f64,
        coefficients: Quadratic,
        precision: u32,
        crossover_probability: f64,
        mutation_probability: f64,
        generations: usize,
    ) -> Self {
        Self {
            population_size,
            left,
            right,
            coefficients,
            precision,
            crossover_probability,
            mutation_probability,
            generations,
            log_level: LogLevel::None,
            degenerate_policy: DegeneratePolicy::Uniform,
            seed: None,
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_interval(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    pub fn get_coefficients(&self) -> Quadratic {
        self.coefficients
    }

    pub fn get_precision(&self) -> u32 {
        self.precision
    }

    /// Crossover participation probability in percent.
    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    /// Per-bit mutation probability in percent.
    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_generations(&self) -> usize {
        self.generations
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate_policy
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the policy for populations whose fitness does not sum to a positive value.
    pub fn set_degenerate_policy(&mut self, policy: DegeneratePolicy) {
        self.degenerate_policy = policy;
    }

    /// Sets the seed used by [`GaOptions::rng`].
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// A random number generator seeded from `seed`, or from entropy when unset.
    pub fn rng(&self) -> RandomNumberGenerator {
        match self.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        }
    }

    /// Checks every parameter; the interval and precision are checked again when the
    /// encoder is derived.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if !self.left.is_finite() || !self.right.is_finite() || self.left >= self.right {
            return Err(GeneticError::Configuration(format!(
                "Interval [{}, {}] must be finite with left below right",
                self.left, self.right
            )));
        }

        for (name, value) in [
            ("Crossover", self.crossover_probability),
            ("Mutation", self.mutation_probability),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(GeneticError::Configuration(format!(
                    "{} probability {} must be a percentage in [0, 100]",
                    name, value
                )));
            }
        }

        let Quadratic { a, b, c } = self.coefficients;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(GeneticError::Configuration(format!(
                "Objective coefficients must be finite, got a={} b={} c={}",
                a, b, c
            )));
        }

        if self.generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns a builder for creating a `GaOptions` instance.
    pub fn builder() -> GaOptionsBuilder {
        GaOptionsBuilder::default()
    }
}

impl Default for GaOptions {
    fn default() -> Self {
        Self::new(3, -10.0, 10.0, Quadratic::new(1.0, 0.0, 0.0), 4, 80.0, 1.0, 100)
    }
}

/// Builder for `GaOptions`. Unset fields fall back to [`GaOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct GaOptionsBuilder {
    population_size: Option<usize>,
    interval: Option<(f64, f64)>,
    coefficients: Option<Quadratic>,
    precision: Option<u32>,
    crossover_probability: Option<f64>,
    mutation_probability: Option<f64>,
    generations: Option<usize>,
    log_level: Option<LogLevel>,
    degenerate_policy: Option<DegeneratePolicy>,
    seed: Option<u64>,
}

impl GaOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn interval(mut self, left: f64, right: f64) -> Self {
        self.interval = Some((left, right));
        self
    }

    /// Sets `a`, `b` and `c` of `a·x² + b·x + c`.
    pub fn coefficients(mut self, a: f64, b: f64, c: f64) -> Self {
        self.coefficients = Some(Quadratic::new(a, b, c));
        self
    }

    pub fn precision(mut self, value: u32) -> Self {
        self.precision = Some(value);
        self
    }

    /// Percent.
    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    /// Percent per bit.
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    pub fn generations(mut self, value: usize) -> Self {
        self.generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn degenerate_policy(mut self, value: DegeneratePolicy) -> Self {
        self.degenerate_policy = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `GaOptions` instance. Call [`GaOptions::validate`] to check it.
    pub fn build(self) -> GaOptions {
        let defaults = GaOptions::default();
        let (left, right) = self.interval.unwrap_or((defaults.left, defaults.right));

        GaOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            left,
            right,
            coefficients: self.coefficients.unwrap_or(defaults.coefficients),
            precision: self.precision.unwrap_or(defaults.precision),
            crossover_probability: self
                .crossover_probability
                .unwrap_or(defaults.crossover_probability),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(defaults.mutation_probability),
            generations: self.generations.unwrap_or(defaults.generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            degenerate_policy: self.degenerate_policy.unwrap_or(defaults.degenerate_policy),
            seed: self.seed,
        }
    }
}
