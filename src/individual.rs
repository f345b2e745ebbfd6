//! # Individual
//!
//! An evaluated chromosome: its bits, the real value they decode to, and the
//! objective's score for that value. Every reporting checkpoint is a list of these.

use crate::{
    chromosome::Chromosome,
    encoding::Encoder,
    error::{GeneticError, Result},
    objective::Objective,
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    pub chromosome: Chromosome,
    /// Decoded value inside the search interval.
    pub x: f64,
    pub fitness: f64,
}

impl Individual {
    /// Decodes and scores a single chromosome.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` for a chromosome of the wrong length and
    /// `FitnessCalculation` when the objective yields NaN or an infinity.
    pub fn evaluate<O>(chromosome: Chromosome, encoder: &Encoder, objective: &O) -> Result<Self>
    where
        O: Objective + ?Sized,
    {
        let x = encoder.decode(&chromosome)?;
        let fitness = objective.score(x);

        if !fitness.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score {} at x = {}",
                fitness, x
            )));
        }

        Ok(Self {
            chromosome,
            x,
            fitness,
        })
    }

    /// Decodes and scores a chromosome for display, accepting whatever the
    /// objective returns.
    pub fn describe<O>(chromosome: Chromosome, encoder: &Encoder, objective: &O) -> Self
    where
        O: Objective + ?Sized,
    {
        let x = encoder.position(&chromosome);
        Self {
            fitness: objective.score(x),
            x,
            chromosome,
        }
    }
}

/// Evaluates every chromosome of a population, keeping its order.
pub fn evaluate_population<O>(
    population: Vec<Chromosome>,
    encoder: &Encoder,
    objective: &O,
) -> Result<Vec<Individual>>
where
    O: Objective + ?Sized,
{
    population
        .into_iter()
        .map(|chromosome| Individual::evaluate(chromosome, encoder, objective))
        .collect()
}

/// Infallible counterpart of [`evaluate_population`] for narrating intermediate
/// populations.
pub fn describe_population<O>(
    population: &[Chromosome],
    encoder: &Encoder,
    objective: &O,
) -> Vec<Individual>
where
    O: Objective + ?Sized,
{
    population
        .iter()
        .map(|chromosome| Individual::describe(chromosome.clone(), encoder, objective))
        .collect()
}
