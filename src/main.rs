//! bitga CLI - maximize a quadratic over an interval and write the run narration.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use bitga::{
    error::ResultExt,
    evolution::{EvolutionLauncher, GaOptions, LogLevel, TextReport, TracingObserver},
    selection::DegeneratePolicy,
    Result,
};

#[derive(Parser, Debug)]
#[command(
    name = "bitga",
    about = "Maximize a*x^2 + b*x + c on [left, right] with a binary genetic algorithm",
    version
)]
struct Cli {
    #[arg(long, default_value_t = 3)]
    population_size: usize,
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    left: f64,
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    right: f64,
    #[arg(short, default_value_t = 1.0, allow_negative_numbers = true)]
    a: f64,
    #[arg(short, default_value_t = 0.0, allow_negative_numbers = true)]
    b: f64,
    #[arg(short, default_value_t = 0.0, allow_negative_numbers = true)]
    c: f64,
    /// Decimal places of resolution.
    #[arg(long, default_value_t = 4)]
    precision: u32,
    /// Percent.
    #[arg(long, default_value_t = 80.0)]
    crossover: f64,
    /// Percent per bit.
    #[arg(long, default_value_t = 1.0)]
    mutation: f64,
    #[arg(long, default_value_t = 100)]
    generations: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the run narration.
    #[arg(long, default_value = "evolution.txt")]
    report: PathBuf,
    /// Number of leading generations narrated step by step.
    #[arg(long, default_value_t = 1)]
    verbose_generations: usize,
    /// Abort instead of selecting uniformly when total fitness is not positive.
    #[arg(long)]
    fail_on_degenerate: bool,
    /// Log one line per generation; repeat to also log every checkpoint.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Forward every run event to the log (visible with RUST_LOG=bitga=trace).
    #[arg(long)]
    trace_events: bool,
}

impl Cli {
    fn options(&self) -> GaOptions {
        let mut builder = GaOptions::builder()
            .population_size(self.population_size)
            .interval(self.left, self.right)
            .coefficients(self.a, self.b, self.c)
            .precision(self.precision)
            .crossover_probability(self.crossover)
            .mutation_probability(self.mutation)
            .generations(self.generations)
            .log_level(match self.verbose {
                0 => LogLevel::None,
                1 => LogLevel::Minimal,
                _ => LogLevel::Verbose,
            })
            .degenerate_policy(if self.fail_on_degenerate {
                DegeneratePolicy::Fail
            } else {
                DegeneratePolicy::Uniform
            });
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    let launcher = EvolutionLauncher::from_options(options)?;
    let mut rng = launcher.options().rng();

    let file = File::create(&cli.report)
        .context(format!("Failed to create report {}", cli.report.display()))?;
    let mut report =
        TextReport::with_verbose_generations(BufWriter::new(file), cli.verbose_generations);

    let result = if cli.trace_events {
        launcher.run_observed(&mut rng, &mut (&mut report, TracingObserver))?
    } else {
        launcher.run_observed(&mut rng, &mut report)?
    };
    report.finish()?;

    println!("Maximum: {}", result.best_fitness);
    println!("At x = {} ({})", result.best_x, result.best_chromosome);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
