//! Running statistics owned by the evolution loop.

use crate::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
    individual::Individual,
};

/// Statistics of one completed generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Running maximum over this and every earlier generation.
    pub max_fitness: f64,
    /// Mean fitness of this generation's final population.
    pub mean_fitness: f64,
    pub total_fitness: f64,
}

/// Best fitness seen so far plus the mean of the last generation.
///
/// The maximum starts at negative infinity and never decreases. A new value replaces
/// the old one only when it is strictly greater, so the recorded x is the first one
/// that reached the maximum.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    max_fitness: f64,
    best: Option<Individual>,
    last_mean: Option<f64>,
    generations_completed: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            max_fitness: f64::NEG_INFINITY,
            best: None,
            last_mean: None,
            generations_completed: 0,
        }
    }

    pub fn max_fitness(&self) -> f64 {
        self.max_fitness
    }

    /// The individual that first reached `max_fitness`.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    pub fn best_x(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.x)
    }

    pub fn best_chromosome(&self) -> Option<&Chromosome> {
        self.best.as_ref().map(|b| &b.chromosome)
    }

    pub fn last_mean(&self) -> Option<f64> {
        self.last_mean
    }

    pub fn generations_completed(&self) -> usize {
        self.generations_completed
    }

    /// Folds one generation's evaluated population into the state.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` when `evaluated` is empty.
    pub fn absorb(self, evaluated: &[Individual]) -> Result<(Self, GenerationStats)> {
        if evaluated.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut max_fitness = self.max_fitness;
        let mut best = self.best;
        let mut total_fitness = 0.0;

        for individual in evaluated {
            total_fitness += individual.fitness;
            if individual.fitness > max_fitness {
                max_fitness = individual.fitness;
                best = Some(individual.clone());
            }
        }

        let mean_fitness = total_fitness / evaluated.len() as f64;
        let stats = GenerationStats {
            generation: self.generations_completed,
            max_fitness,
            mean_fitness,
            total_fitness,
        };

        let state = Self {
            max_fitness,
            best,
            last_mean: Some(mean_fitness),
            generations_completed: self.generations_completed + 1,
        };

        Ok((state, stats))
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
