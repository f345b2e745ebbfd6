use crate::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
    rng::{self, UniformSource},
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MutationReport {
    /// Per-bit flip probability as a fraction in `[0, 1]`.
    pub probability: f64,
    /// Indices of chromosomes that had at least one bit flipped.
    pub mutated: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MutationOutcome {
    pub population: Vec<Chromosome>,
    pub report: MutationReport,
}

/// Independent per-bit mutation: every bit of every chromosome flips with the same
/// probability.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitFlipMutation {
    probability: f64,
}

impl BitFlipMutation {
    /// `probability` is a fraction in `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Consumes `population.len() * bit_number` draws, chromosome by chromosome.
    pub fn mutate<R>(
        &self,
        population: Vec<Chromosome>,
        bit_number: usize,
        rng: &mut R,
    ) -> Result<MutationOutcome>
    where
        R: UniformSource + ?Sized,
    {
        let draws = rng::draws(rng, population.len() * bit_number)?;
        self.mutate_with(population, bit_number, &draws)
    }

    /// Mutates with explicit draws laid out row by row, `bit_number` per chromosome.
    pub fn mutate_with(
        &self,
        mut population: Vec<Chromosome>,
        bit_number: usize,
        draws: &[f64],
    ) -> Result<MutationOutcome> {
        let expected = population.len() * bit_number;
        if draws.len() != expected {
            return Err(GeneticError::LengthMismatch {
                expected,
                found: draws.len(),
            });
        }

        let mut mutated = Vec::new();
        if bit_number > 0 {
            for (i, (chromosome, row)) in population
                .iter_mut()
                .zip(draws.chunks(bit_number))
                .enumerate()
            {
                if chromosome.mutate(row, self.probability)? {
                    mutated.push(i);
                }
            }
        }

        Ok(MutationOutcome {
            population,
            report: MutationReport {
                probability: self.probability,
                mutated,
            },
        })
    }
}
