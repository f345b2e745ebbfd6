//! # SinglePointCrossover
//!
//! Walks the selected population in index order and lets each chromosome join the
//! mating pool with probability `crossover_probability`. Participants are paired in
//! the order they turn up; each pair swaps tails at the point drawn for the left
//! partner's index, and the children replace their parents in place. A participant
//! left without a partner at the end stays as it is.

use crate::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
    rng::{self, UniformSource},
};

/// One recombination, reported with both parents and both children.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CrossoverPair {
    pub left: usize,
    pub right: usize,
    pub point: usize,
    pub parents: (Chromosome, Chromosome),
    pub children: (Chromosome, Chromosome),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CrossoverReport {
    /// Participation threshold as a fraction in `[0, 1]`.
    pub probability: f64,
    /// Participation draw for every index.
    pub draws: Vec<f64>,
    /// Indices whose draw fell below the threshold, in order.
    pub participants: Vec<usize>,
    pub pairs: Vec<CrossoverPair>,
    /// Last participant, when their count is odd.
    pub unpaired: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossoverOutcome {
    pub population: Vec<Chromosome>,
    pub report: CrossoverReport,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinglePointCrossover {
    probability: f64,
}

impl SinglePointCrossover {
    /// `probability` is a fraction in `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Draws participation and crossover points, then recombines.
    ///
    /// Consumes `population.len()` participation draws followed by `population.len()`
    /// point draws in `[0, bit_number)`.
    pub fn recombine<R>(
        &self,
        population: Vec<Chromosome>,
        bit_number: usize,
        rng: &mut R,
    ) -> Result<CrossoverOutcome>
    where
        R: UniformSource + ?Sized,
    {
        let draws = rng::draws(rng, population.len())?;
        let points = (0..population.len())
            .map(|_| rng::draw_index(rng, bit_number))
            .collect::<Result<Vec<_>>>()?;

        self.recombine_with(population, draws, &points)
    }

    /// Recombines with explicit participation draws and per-index crossover points.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `draws` or `points` do not have one entry per
    /// chromosome, or if two paired chromosomes differ in length.
    pub fn recombine_with(
        &self,
        mut population: Vec<Chromosome>,
        draws: Vec<f64>,
        points: &[usize],
    ) -> Result<CrossoverOutcome> {
        for found in [draws.len(), points.len()] {
            if found != population.len() {
                return Err(GeneticError::LengthMismatch {
                    expected: population.len(),
                    found,
                });
            }
        }

        let mut participants = Vec::new();
        let mut pairs = Vec::new();
        let mut pending: Option<usize> = None;

        for (i, &u) in draws.iter().enumerate() {
            if u >= self.probability {
                continue;
            }
            participants.push(i);

            match pending.take() {
                None => pending = Some(i),
                Some(left) => {
                    let point = points[left];
                    let parents = (population[left].clone(), population[i].clone());
                    let children = parents.0.crossover(&parents.1, point)?;

                    population[left] = children.0.clone();
                    population[i] = children.1.clone();
                    pairs.push(CrossoverPair {
                        left,
                        right: i,
                        point,
                        parents,
                        children,
                    });
                }
            }
        }

        Ok(CrossoverOutcome {
            population,
            report: CrossoverReport {
                probability: self.probability,
                draws,
                participants,
                pairs,
                unpaired: pending,
            },
        })
    }
}
