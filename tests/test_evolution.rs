use bitga::{
    error::GeneticError,
    evolution::{Checkpoint, EvolutionLauncher, GaOptions, LogLevel, RecordingObserver},
    rng::{RandomNumberGenerator, SequenceSource, UniformSource},
    selection::{DegeneratePolicy, RouletteSelection},
};

fn reference_options(generations: usize) -> GaOptions {
    GaOptions::builder()
        .population_size(3)
        .interval(-10.0, 10.0)
        .coefficients(1.0, 0.0, 0.0)
        .precision(4)
        .crossover_probability(80.0)
        .mutation_probability(1.0)
        .generations(generations)
        .build()
}

#[test]
fn test_reference_scenario_single_generation() {
    let launcher = EvolutionLauncher::from_options(reference_options(1)).unwrap();
    assert_eq!(launcher.encoder().bit_number(), 18);
    assert_eq!(launcher.encoder().disc(), 20.0 / 262_144.0);

    let mut rng = RandomNumberGenerator::from_seed(2024);
    let mut recorder = RecordingObserver::new();
    let result = launcher.run_observed(&mut rng, &mut recorder).unwrap();

    let final_max = result
        .final_population
        .iter()
        .map(|i| i.fitness)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(result.best_fitness, final_max);
    assert_eq!(result.generations, 1);

    let best = result
        .final_population
        .iter()
        .find(|i| i.fitness == final_max)
        .unwrap();
    assert_eq!(result.best_x, best.x);
    assert_eq!(result.best_chromosome, best.chromosome);
}

#[test]
fn test_global_max_is_monotonic() {
    let launcher = EvolutionLauncher::from_options(
        GaOptions::builder()
            .population_size(8)
            .generations(60)
            .mutation_probability(5.0)
            .build(),
    )
    .unwrap();
    let mut rng = RandomNumberGenerator::from_seed(17);

    let result = launcher.run(&mut rng).unwrap();

    assert_eq!(result.history.len(), 60);
    for window in result.history.windows(2) {
        assert!(window[1].max_fitness >= window[0].max_fitness);
    }
    assert_eq!(result.history.last().unwrap().max_fitness, result.best_fitness);
}

#[test]
fn test_elite_survives_selection() {
    let launcher = EvolutionLauncher::from_options(
        GaOptions::builder().population_size(6).generations(25).build(),
    )
    .unwrap();
    let mut rng = RandomNumberGenerator::from_seed(8);
    let mut recorder = RecordingObserver::new();

    launcher.run_observed(&mut rng, &mut recorder).unwrap();

    for generation in 0..25 {
        let initial = recorder.population(generation, Checkpoint::Initial).unwrap();
        let selected = recorder.population(generation, Checkpoint::Selected).unwrap();
        let report = recorder.selection(generation).unwrap();

        let best = initial
            .iter()
            .map(|i| i.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(initial[report.elite].fitness, best);
        assert_eq!(selected[0].chromosome, initial[report.elite].chromosome);
    }
}

#[test]
fn test_every_checkpoint_keeps_bit_length() {
    let launcher = EvolutionLauncher::from_options(
        GaOptions::builder()
            .population_size(5)
            .interval(-1.0, 2.0)
            .precision(6)
            .generations(10)
            .mutation_probability(20.0)
            .build(),
    )
    .unwrap();
    let bits = launcher.encoder().bit_number();
    let mut rng = RandomNumberGenerator::from_seed(31);
    let mut recorder = RecordingObserver::new();

    launcher.run_observed(&mut rng, &mut recorder).unwrap();

    for generation in 0..10 {
        for checkpoint in [
            Checkpoint::Initial,
            Checkpoint::Selected,
            Checkpoint::Recombined,
            Checkpoint::Final,
        ] {
            let individuals = recorder.population(generation, checkpoint).unwrap();
            assert_eq!(individuals.len(), 5);
            assert!(individuals.iter().all(|i| i.chromosome.len() == bits));
        }
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let launcher = EvolutionLauncher::from_options(reference_options(30)).unwrap();

    let first = launcher
        .run(&mut RandomNumberGenerator::from_seed(77))
        .unwrap();
    let second = launcher
        .run(&mut RandomNumberGenerator::from_seed(77))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_replayed_draws_are_identical() {
    let draws = RandomNumberGenerator::from_seed(5).fetch_uniform(1_000).unwrap();
    let launcher = EvolutionLauncher::from_options(reference_options(5)).unwrap();

    let mut first_source = SequenceSource::new(draws.clone());
    let mut second_source = SequenceSource::new(draws);
    let first = launcher.run(&mut first_source).unwrap();
    let second = launcher.run(&mut second_source).unwrap();

    assert_eq!(first, second);
    // 3 * 18 initial bits, then per generation 2 + 3 + 3 + 3 * 18 draws.
    assert_eq!(first_source.consumed(), 54 + 5 * 62);
}

#[test]
fn test_exhausted_draws_fail_cleanly() {
    let launcher = EvolutionLauncher::from_options(reference_options(5)).unwrap();
    let mut source = SequenceSource::new(vec![0.3; 100]);

    let result = launcher.run(&mut source);
    assert!(matches!(result, Err(GeneticError::RandomGeneration(_))));
}

#[test]
fn test_zero_objective_signals_degenerate_total() {
    let options = GaOptions::builder()
        .coefficients(0.0, 0.0, 0.0)
        .degenerate_policy(DegeneratePolicy::Fail)
        .generations(3)
        .build();
    let launcher = EvolutionLauncher::from_options(options).unwrap();

    let result = launcher.run(&mut RandomNumberGenerator::from_seed(1));
    assert!(matches!(
        result,
        Err(GeneticError::NonPositiveTotalFitness { total }) if total == 0.0
    ));

    let population = launcher
        .initial_population(&mut RandomNumberGenerator::from_seed(1))
        .unwrap();
    let evaluated = launcher.evaluate(population).unwrap();
    let fitness: Vec<f64> = evaluated.iter().map(|i| i.fitness).collect();
    assert!(matches!(
        RouletteSelection::probabilities(&fitness),
        Err(GeneticError::NonPositiveTotalFitness { .. })
    ));
}

#[test]
fn test_zero_objective_falls_back_to_uniform() {
    let options = GaOptions::builder()
        .coefficients(0.0, 0.0, 0.0)
        .generations(3)
        .build();
    let launcher = EvolutionLauncher::from_options(options).unwrap();
    let mut recorder = RecordingObserver::new();

    let result = launcher
        .run_observed(&mut RandomNumberGenerator::from_seed(1), &mut recorder)
        .unwrap();

    assert_eq!(result.best_fitness, 0.0);
    assert!(recorder.selection(0).unwrap().uniform_fallback);
}

#[test]
fn test_invalid_configuration_never_runs() {
    let cases = [
        GaOptions::builder().population_size(0).build(),
        GaOptions::builder().interval(3.0, -3.0).build(),
        GaOptions::builder().crossover_probability(150.0).build(),
        GaOptions::builder().mutation_probability(-1.0).build(),
        GaOptions::builder().generations(0).build(),
        GaOptions::builder().precision(40).build(),
    ];

    for options in cases {
        assert!(matches!(
            EvolutionLauncher::from_options(options),
            Err(GeneticError::Configuration(_))
        ));
    }
}

#[test]
fn test_finds_square_maximum_near_the_edges() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let options = GaOptions::builder()
        .population_size(20)
        .generations(100)
        .log_level(LogLevel::Minimal)
        .build();
    let launcher = EvolutionLauncher::from_options(options).unwrap();

    let result = launcher
        .run(&mut RandomNumberGenerator::from_seed(3))
        .unwrap();

    assert!(result.best_fitness > 90.0);
    assert!(result.best_x.abs() > 9.4);
}

#[test]
fn test_custom_objective_closure() {
    let options = GaOptions::builder()
        .population_size(30)
        .generations(200)
        .build();
    let peak = |x: f64| 200.0 - (x - 3.0).powi(2);
    let launcher = EvolutionLauncher::new(options, peak).unwrap();

    let result = launcher
        .run(&mut RandomNumberGenerator::from_seed(12))
        .unwrap();

    assert!(result.best_fitness > 199.0);
    assert!((result.best_x - 3.0).abs() < 1.0);
}
