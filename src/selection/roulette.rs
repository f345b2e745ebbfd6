use tracing::warn;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::rng::{self, UniformSource};

/// What the selector does when the population's total fitness is not positive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Give every chromosome the same selection probability.
    #[default]
    Uniform,
    /// Abort the run with `GeneticError::NonPositiveTotalFitness`.
    Fail,
}

/// One stochastic slot of the new population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionDraw {
    pub u: f64,
    /// Index into the previous population of the chromosome that was copied.
    pub index: usize,
}

/// Everything the selector decided, minus the chromosomes themselves.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionReport {
    /// `[0, p_0, p_0 + p_1, ...]`, one entry longer than the population.
    pub cumulative: Vec<f64>,
    /// Index of the fittest chromosome, copied verbatim into slot 0.
    pub elite: usize,
    /// Draws for slots `1..population_size`, in slot order.
    pub draws: Vec<SelectionDraw>,
    /// Set when the total fitness was not positive and uniform probabilities were used.
    pub uniform_fallback: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionOutcome {
    pub selected: Vec<Chromosome>,
    pub report: SelectionReport,
}

/// Fitness-proportionate (roulette wheel) selection with one-chromosome elitism.
///
/// Slot 0 of the new population always receives the fittest chromosome. Every other
/// slot draws `u` in `[0, 1)` and copies the chromosome whose cumulative probability
/// interval contains it.
///
/// # Examples
///
/// ```
/// use bitga::encoding::Encoder;
/// use bitga::individual::evaluate_population;
/// use bitga::objective::Quadratic;
/// use bitga::rng::SequenceSource;
/// use bitga::selection::RouletteSelection;
///
/// let encoder = Encoder::new(0.0, 8.0, 0).unwrap();
/// let identity = Quadratic::new(0.0, 1.0, 0.0);
/// let population = vec!["001".parse().unwrap(), "011".parse().unwrap()];
/// let evaluated = evaluate_population(population, &encoder, &identity).unwrap();
///
/// // Fitness 1 and 3: cumulative [0, 0.25, 1.0]
/// let mut draws = SequenceSource::new([0.1]);
/// let outcome = RouletteSelection::default().select(&evaluated, &mut draws).unwrap();
///
/// assert_eq!(outcome.report.elite, 1);
/// assert_eq!(outcome.selected[0].to_string(), "011");
/// assert_eq!(outcome.selected[1].to_string(), "001");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouletteSelection {
    policy: DegeneratePolicy,
}

impl RouletteSelection {
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Calculates `fitness_i / Σ fitness` for every individual.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for an empty slice and `NonPositiveTotalFitness` if the
    /// sum is zero, negative or not finite.
    pub fn probabilities(fitness: &[f64]) -> Result<Vec<f64>> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let total: f64 = fitness.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(GeneticError::NonPositiveTotalFitness { total });
        }

        Ok(fitness.iter().map(|&f| f / total).collect())
    }

    /// Prefix sums of `probabilities`, starting at 0.
    pub fn cumulative(probabilities: &[f64]) -> Vec<f64> {
        let mut cumulative = Vec::with_capacity(probabilities.len() + 1);
        cumulative.push(0.0);
        let mut running = 0.0;
        for &p in probabilities {
            running += p;
            cumulative.push(running);
        }
        cumulative
    }

    /// First index holding the strictly highest fitness.
    pub fn elite_index(fitness: &[f64]) -> Result<usize> {
        let mut best: Option<usize> = None;
        for (i, &f) in fitness.iter().enumerate() {
            match best {
                Some(b) if f <= fitness[b] => {}
                _ => best = Some(i),
            }
        }
        best.ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Finds the smallest `k` with `cumulative[k] >= u` and returns `k - 1`.
    ///
    /// The result is clamped into `0..cumulative.len() - 1`: `u = 0` maps to the first
    /// chromosome, and a `u` above a final sum that rounded below 1 maps to the last.
    pub fn locate(cumulative: &[f64], u: f64) -> usize {
        let population_size = cumulative.len().saturating_sub(1);

        let (mut lo, mut hi) = (0, cumulative.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if cumulative[mid] < u {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo.saturating_sub(1).min(population_size.saturating_sub(1))
    }

    /// Builds the next population: the elite in slot 0, then one roulette draw per slot.
    ///
    /// Consumes exactly `population.len() - 1` draws.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for an empty population, `RandomGeneration` for a draw
    /// outside `[0, 1)`, and `NonPositiveTotalFitness` when the total fitness is not
    /// positive under [`DegeneratePolicy::Fail`].
    pub fn select<R>(&self, population: &[Individual], rng: &mut R) -> Result<SelectionOutcome>
    where
        R: UniformSource + ?Sized,
    {
        let fitness: Vec<f64> = population.iter().map(|i| i.fitness).collect();
        let elite = Self::elite_index(&fitness)?;

        let (probabilities, uniform_fallback) = match Self::probabilities(&fitness) {
            Ok(probabilities) => (probabilities, false),
            Err(GeneticError::NonPositiveTotalFitness { total })
                if self.policy == DegeneratePolicy::Uniform =>
            {
                warn!(
                    total,
                    "Total fitness is not positive, falling back to uniform selection"
                );
                let share = 1.0 / population.len() as f64;
                (vec![share; population.len()], true)
            }
            Err(e) => return Err(e),
        };
        let cumulative = Self::cumulative(&probabilities);

        let mut selected = Vec::with_capacity(population.len());
        selected.push(population[elite].chromosome.clone());

        let mut draws = Vec::with_capacity(population.len() - 1);
        for _ in 1..population.len() {
            let u = rng::draw(rng)?;
            let index = Self::locate(&cumulative, u);
            selected.push(population[index].chromosome.clone());
            draws.push(SelectionDraw { u, index });
        }

        Ok(SelectionOutcome {
            selected,
            report: SelectionReport {
                cumulative,
                elite,
                draws,
                uniform_fallback,
            },
        })
    }
}
