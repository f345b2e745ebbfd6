use tracing::{debug, info};

use super::{
    observer::{Checkpoint, EvolutionEvent, EvolutionObserver},
    options::{GaOptions, LogLevel},
    state::{GenerationStats, RunState},
};
use crate::{
    breeding::{BitFlipMutation, SinglePointCrossover},
    chromosome::Chromosome,
    encoding::Encoder,
    error::{GeneticError, OptionExt, Result},
    individual::{describe_population, evaluate_population, Individual},
    objective::{Objective, Quadratic},
    rng::{self, UniformSource},
    selection::RouletteSelection,
};

/// Represents the result of an evolution: the best solution over all generations.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Highest fitness seen in any generation.
    pub best_fitness: f64,
    /// Decoded value that first reached `best_fitness`.
    pub best_x: f64,
    pub best_chromosome: Chromosome,
    pub generations: usize,
    /// Running maximum and mean fitness, one entry per generation.
    pub history: Vec<GenerationStats>,
    /// The population after the last generation.
    pub final_population: Vec<Individual>,
}

/// Runs the generational loop: selection, crossover, mutation, evaluation.
///
/// # Examples
///
/// ```
/// use bitga::evolution::{EvolutionLauncher, GaOptions};
/// use bitga::rng::RandomNumberGenerator;
///
/// let options = GaOptions::builder()
///     .population_size(10)
///     .generations(20)
///     .build();
/// let launcher = EvolutionLauncher::from_options(options).unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let result = launcher.run(&mut rng).unwrap();
///
/// assert_eq!(result.history.len(), 20);
/// assert!(result.best_fitness <= 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<O: Objective> {
    options: GaOptions,
    encoder: Encoder,
    objective: O,
    selection: RouletteSelection,
    crossover: SinglePointCrossover,
    mutation: BitFlipMutation,
}

impl EvolutionLauncher<Quadratic> {
    /// Creates a launcher maximizing the quadratic whose coefficients `options` holds.
    pub fn from_options(options: GaOptions) -> Result<Self> {
        let objective = options.get_coefficients();
        Self::new(options, objective)
    }
}

impl<O: Objective> EvolutionLauncher<O> {
    /// Creates a new `EvolutionLauncher` maximizing `objective`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `options` is invalid, so an invalid
    /// configuration never reaches the loop.
    pub fn new(options: GaOptions, objective: O) -> Result<Self> {
        options.validate()?;
        let (left, right) = options.get_interval();
        let encoder = Encoder::new(left, right, options.get_precision())?;

        Ok(Self {
            selection: RouletteSelection::new(options.get_degenerate_policy()),
            crossover: SinglePointCrossover::new(options.get_crossover_probability() / 100.0),
            mutation: BitFlipMutation::new(options.get_mutation_probability() / 100.0),
            options,
            encoder,
            objective,
        })
    }

    pub fn options(&self) -> &GaOptions {
        &self.options
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Draws `population_size * bit_number` values, one per bit, row by row.
    pub fn initial_population<R>(&self, rng: &mut R) -> Result<Vec<Chromosome>>
    where
        R: UniformSource + ?Sized,
    {
        let bits = self.encoder.bit_number();
        let draws = rng::draws(rng, self.options.get_population_size() * bits)?;
        Ok(draws.chunks(bits).map(Chromosome::from_draws).collect())
    }

    /// Decodes and scores every chromosome.
    pub fn evaluate(&self, population: Vec<Chromosome>) -> Result<Vec<Individual>> {
        evaluate_population(population, &self.encoder, &self.objective)
    }

    /// Runs one generation on an evaluated population.
    ///
    /// Returns the evaluated next population, the updated run state and this
    /// generation's statistics.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `population` does not hold exactly
    /// `population_size` individuals, and propagates selection, random source and
    /// evaluation failures.
    pub fn step<R, Obs>(
        &self,
        generation: usize,
        population: Vec<Individual>,
        state: RunState,
        rng: &mut R,
        observer: &mut Obs,
    ) -> Result<(Vec<Individual>, RunState, GenerationStats)>
    where
        R: UniformSource + ?Sized,
        Obs: EvolutionObserver + ?Sized,
    {
        if population.len() != self.options.get_population_size() {
            return Err(GeneticError::Configuration(format!(
                "Population holds {} chromosomes, expected {}",
                population.len(),
                self.options.get_population_size()
            )));
        }
        let bits = self.encoder.bit_number();
        let observed = observer.enabled();

        if observed {
            observer.observe(&EvolutionEvent::Population {
                generation,
                checkpoint: Checkpoint::Initial,
                individuals: population.clone(),
            });
        }

        let selection = self.selection.select(&population, rng)?;
        self.trace_checkpoint(generation, Checkpoint::Selected);
        if observed {
            observer.observe(&EvolutionEvent::Selection {
                generation,
                report: selection.report.clone(),
            });
            observer.observe(&EvolutionEvent::Population {
                generation,
                checkpoint: Checkpoint::Selected,
                individuals: self.describe(&selection.selected),
            });
        }

        let crossover = self.crossover.recombine(selection.selected, bits, rng)?;
        self.trace_checkpoint(generation, Checkpoint::Recombined);
        if observed {
            observer.observe(&EvolutionEvent::Crossover {
                generation,
                report: crossover.report.clone(),
            });
            observer.observe(&EvolutionEvent::Population {
                generation,
                checkpoint: Checkpoint::Recombined,
                individuals: self.describe(&crossover.population),
            });
        }

        let mutation = self.mutation.mutate(crossover.population, bits, rng)?;
        let next = self.evaluate(mutation.population)?;
        self.trace_checkpoint(generation, Checkpoint::Final);
        if observed {
            observer.observe(&EvolutionEvent::Mutation {
                generation,
                report: mutation.report,
            });
            observer.observe(&EvolutionEvent::Population {
                generation,
                checkpoint: Checkpoint::Final,
                individuals: next.clone(),
            });
        }

        let (state, stats) = state.absorb(&next)?;
        match self.options.get_log_level() {
            LogLevel::Verbose | LogLevel::Minimal => info!(
                generation,
                max_fitness = stats.max_fitness,
                mean_fitness = stats.mean_fitness,
                "Generation complete"
            ),
            LogLevel::None => {}
        }
        if observed {
            observer.observe(&EvolutionEvent::Generation(stats));
        }

        Ok((next, state, stats))
    }

    /// Evolves a random initial population for the configured number of generations.
    pub fn run<R>(&self, rng: &mut R) -> Result<EvolutionResult>
    where
        R: UniformSource + ?Sized,
    {
        self.run_observed(rng, &mut ())
    }

    /// Like [`run`](Self::run), reporting every checkpoint to `observer`.
    pub fn run_observed<R, Obs>(&self, rng: &mut R, observer: &mut Obs) -> Result<EvolutionResult>
    where
        R: UniformSource + ?Sized,
        Obs: EvolutionObserver + ?Sized,
    {
        let initial = self.initial_population(rng)?;
        self.evolve_from(initial, rng, observer)
    }

    /// Evolves a caller-supplied starting population.
    pub fn evolve_from<R, Obs>(
        &self,
        initial: Vec<Chromosome>,
        rng: &mut R,
        observer: &mut Obs,
    ) -> Result<EvolutionResult>
    where
        R: UniformSource + ?Sized,
        Obs: EvolutionObserver + ?Sized,
    {
        debug!(
            bit_number = self.encoder.bit_number(),
            disc = self.encoder.disc(),
            population_size = self.options.get_population_size(),
            generations = self.options.get_generations(),
            "Starting evolution"
        );

        let mut population = self.evaluate(initial)?;
        let mut state = RunState::new();
        let mut history = Vec::with_capacity(self.options.get_generations());

        for generation in 0..self.options.get_generations() {
            let (next, next_state, stats) =
                self.step(generation, population, state, rng, observer)?;
            population = next;
            state = next_state;
            history.push(stats);
        }

        let best = state.best().ok_or_else_genetic(|| {
            GeneticError::Other("Evolution completed without evaluating a population".to_string())
        })?;

        Ok(EvolutionResult {
            best_fitness: state.max_fitness(),
            best_x: best.x,
            best_chromosome: best.chromosome.clone(),
            generations: history.len(),
            history,
            final_population: population,
        })
    }

    /// Scores an intermediate population for observers. Never fails, so attaching
    /// an observer cannot change the outcome of a run.
    fn describe(&self, population: &[Chromosome]) -> Vec<Individual> {
        describe_population(population, &self.encoder, &self.objective)
    }

    fn trace_checkpoint(&self, generation: usize, checkpoint: Checkpoint) {
        if self.options.get_log_level() == LogLevel::Verbose {
            debug!(generation, ?checkpoint, "Checkpoint reached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::observer::RecordingObserver;
    use crate::rng::{RandomNumberGenerator, SequenceSource};

    fn launcher(population_size: usize, generations: usize) -> EvolutionLauncher<Quadratic> {
        let options = GaOptions::builder()
            .population_size(population_size)
            .generations(generations)
            .build();
        EvolutionLauncher::from_options(options).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let options = GaOptions::builder().population_size(0).build();
        let result = EvolutionLauncher::from_options(options);

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_initial_population_shape() {
        let launcher = launcher(5, 1);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let population = launcher.initial_population(&mut rng).unwrap();

        assert_eq!(population.len(), 5);
        assert!(population.iter().all(|c| c.len() == 18));
    }

    #[test]
    fn test_initial_population_threshold() {
        let options = GaOptions::builder()
            .population_size(2)
            .interval(0.0, 8.0)
            .precision(0)
            .build();
        let launcher = EvolutionLauncher::from_options(options).unwrap();
        let mut draws = SequenceSource::new([0.9, 0.1, 0.6, 0.5, 0.51, 0.0]);

        let population = launcher.initial_population(&mut draws).unwrap();
        assert_eq!(population[0].to_string(), "101");
        assert_eq!(population[1].to_string(), "010");
    }

    #[test]
    fn test_step_rejects_wrong_population_size() {
        let launcher = launcher(3, 1);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let population = launcher
            .evaluate(vec![Chromosome::from_value(0, 18).unwrap()])
            .unwrap();

        let result = launcher.step(0, population, RunState::new(), &mut rng, &mut ());
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_step_with_scripted_draws() {
        // 3 bits on [0, 8): chromosome value == x. Fitness = x.
        let options = GaOptions::builder()
            .population_size(3)
            .interval(0.0, 8.0)
            .precision(0)
            .coefficients(0.0, 1.0, 0.0)
            .crossover_probability(50.0)
            .mutation_probability(10.0)
            .generations(1)
            .build();
        let launcher = EvolutionLauncher::from_options(options).unwrap();
        let population = launcher
            .evaluate(vec![
                "001".parse().unwrap(),
                "100".parse().unwrap(),
                "011".parse().unwrap(),
            ])
            .unwrap();

        // Fitness 1, 4, 3: cumulative [0, 0.125, 0.625, 1.0].
        let mut draws = SequenceSource::new(
            [
                // selection for slots 1 and 2
                vec![0.1, 0.7],
                // participation: slots 0 and 2 take part
                vec![0.2, 0.9, 0.3],
                // points: index 0 -> 1
                vec![0.4, 0.0, 0.0],
                // mutation: only the last bit of slot 1 flips
                vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.05, 0.5, 0.5, 0.5],
            ]
            .concat(),
        );
        let mut recorder = RecordingObserver::new();

        let (next, state, stats) = launcher
            .step(0, population, RunState::new(), &mut draws, &mut recorder)
            .unwrap();

        let selected = recorder.population(0, Checkpoint::Selected).unwrap();
        let selected: Vec<String> = selected.iter().map(|i| i.chromosome.to_string()).collect();
        assert_eq!(selected, vec!["100", "001", "011"]);

        let crossover = recorder.crossover(0).unwrap();
        assert_eq!(crossover.participants, vec![0, 2]);
        assert_eq!(crossover.pairs[0].point, 1);

        // 100 x 011 at 1 -> 111 and 000; slot 1 mutates 001 -> 000.
        let bits: Vec<String> = next.iter().map(|i| i.chromosome.to_string()).collect();
        assert_eq!(bits, vec!["111", "000", "000"]);
        assert_eq!(stats.max_fitness, 7.0);
        assert!((stats.mean_fitness - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(state.best_x(), Some(7.0));
        assert_eq!(draws.remaining(), 0);
    }

    #[test]
    fn test_observer_sees_every_checkpoint() {
        let launcher = launcher(4, 2);
        let mut rng = RandomNumberGenerator::from_seed(99);
        let mut recorder = RecordingObserver::new();

        launcher.run_observed(&mut rng, &mut recorder).unwrap();

        for generation in 0..2 {
            for checkpoint in [
                Checkpoint::Initial,
                Checkpoint::Selected,
                Checkpoint::Recombined,
                Checkpoint::Final,
            ] {
                let individuals = recorder.population(generation, checkpoint).unwrap();
                assert_eq!(individuals.len(), 4);
            }
            assert!(recorder.selection(generation).is_some());
        }
        assert_eq!(recorder.stats().len(), 2);
        assert_eq!(recorder.events.len(), 2 * 8);
    }

    #[test]
    fn test_observer_does_not_change_results() {
        let launcher = launcher(6, 15);

        let plain = launcher
            .run(&mut RandomNumberGenerator::from_seed(5))
            .unwrap();
        let observed = launcher
            .run_observed(
                &mut RandomNumberGenerator::from_seed(5),
                &mut RecordingObserver::new(),
            )
            .unwrap();

        assert_eq!(plain, observed);
    }

    #[test]
    fn test_non_finite_intermediate_fitness_does_not_depend_on_observer() {
        // 3 bits on [0, 8): the objective is undefined only at x = 7.
        let options = GaOptions::builder()
            .population_size(2)
            .interval(0.0, 8.0)
            .precision(0)
            .crossover_probability(100.0)
            .mutation_probability(10.0)
            .generations(1)
            .build();
        let launcher = EvolutionLauncher::new(options, |x: f64| {
            if x == 7.0 {
                f64::NAN
            } else {
                x
            }
        })
        .unwrap();
        let initial: Vec<Chromosome> = vec!["011".parse().unwrap(), "100".parse().unwrap()];
        let draws = [
            // elite 100 in slot 0, 011 drawn for slot 1
            vec![0.1],
            // both take part, point 1 for slot 0
            vec![0.1, 0.1],
            vec![0.4, 0.0],
            // 100 x 011 at 1 -> 111 and 000; the leading bit of 111 flips back
            vec![0.05, 0.5, 0.5, 0.5, 0.5, 0.5],
        ]
        .concat();

        let mut plain_source = SequenceSource::new(draws.clone());
        let plain = launcher
            .evolve_from(initial.clone(), &mut plain_source, &mut ())
            .unwrap();

        let mut observed_source = SequenceSource::new(draws);
        let mut recorder = RecordingObserver::new();
        let observed = launcher
            .evolve_from(initial, &mut observed_source, &mut recorder)
            .unwrap();

        assert_eq!(plain, observed);
        assert_eq!(plain.best_fitness, 3.0);
        let recombined = recorder.population(0, Checkpoint::Recombined).unwrap();
        assert!(recombined[0].fitness.is_nan());
    }
}
