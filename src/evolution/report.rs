//! # TextReport
//!
//! A plain-text narration of a run. The first `verbose_generations` generations are
//! written out step by step: every population checkpoint, the cumulative selection
//! intervals, each roulette draw, the crossover pairings and the mutated chromosomes.
//! After that only the running maximum and the mean fitness are written per
//! generation.
//!
//! ## Example
//!
//! ```rust
//! use bitga::evolution::{EvolutionLauncher, GaOptions, TextReport};
//! use bitga::rng::RandomNumberGenerator;
//!
//! let launcher = EvolutionLauncher::from_options(
//!     GaOptions::builder().generations(3).build(),
//! ).unwrap();
//!
//! let mut report = TextReport::new(Vec::new());
//! launcher
//!     .run_observed(&mut RandomNumberGenerator::from_seed(4), &mut report)
//!     .unwrap();
//!
//! let text = String::from_utf8(report.finish().unwrap()).unwrap();
//! assert!(text.starts_with("Initial population"));
//! assert_eq!(text.matches("Max fitness:").count(), 3);
//! ```

use std::io::{self, Write};

use super::observer::{Checkpoint, EvolutionEvent, EvolutionObserver};
use crate::{
    breeding::{CrossoverReport, MutationReport},
    error::Result,
    individual::Individual,
    selection::SelectionReport,
};

pub struct TextReport<W: Write> {
    writer: W,
    verbose_generations: usize,
    error: Option<io::Error>,
}

impl<W: Write> TextReport<W> {
    /// Narrates the first generation in full.
    pub fn new(writer: W) -> Self {
        Self::with_verbose_generations(writer, 1)
    }

    pub fn with_verbose_generations(writer: W, verbose_generations: usize) -> Self {
        Self {
            writer,
            verbose_generations,
            error: None,
        }
    }

    /// Flushes the writer and hands it back, or returns the first write error.
    pub fn finish(mut self) -> Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error.into());
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_event(&mut self, event: &EvolutionEvent) -> io::Result<()> {
        let verbose = event.generation() < self.verbose_generations;

        match event {
            EvolutionEvent::Population {
                checkpoint,
                individuals,
                ..
            } if verbose => self.write_population(*checkpoint, individuals),
            EvolutionEvent::Selection { report, .. } if verbose => self.write_selection(report),
            EvolutionEvent::Crossover { report, .. } if verbose => self.write_crossover(report),
            EvolutionEvent::Mutation { report, .. } if verbose => self.write_mutation(report),
            EvolutionEvent::Generation(stats) => {
                if stats.generation + 1 == self.verbose_generations {
                    writeln!(self.writer, "Evolution of the maximum:")?;
                }
                writeln!(self.writer, "Max fitness: {}", stats.max_fitness)?;
                writeln!(self.writer, "Fitness mean: {}", stats.mean_fitness)?;
                writeln!(self.writer)
            }
            _ => Ok(()),
        }
    }

    fn write_population(
        &mut self,
        checkpoint: Checkpoint,
        individuals: &[Individual],
    ) -> io::Result<()> {
        let title = match checkpoint {
            Checkpoint::Initial => "Initial population",
            Checkpoint::Selected => "After selection:",
            Checkpoint::Recombined => "After recombination:",
            Checkpoint::Final => "After mutation:",
        };
        writeln!(self.writer, "{}", title)?;
        for (i, individual) in individuals.iter().enumerate() {
            writeln!(
                self.writer,
                "{}: {} x={} f={}",
                i + 1,
                individual.chromosome,
                individual.x,
                individual.fitness
            )?;
        }
        writeln!(self.writer)
    }

    fn write_selection(&mut self, report: &SelectionReport) -> io::Result<()> {
        if report.uniform_fallback {
            writeln!(
                self.writer,
                "Total fitness is not positive, selecting uniformly"
            )?;
        }
        writeln!(self.writer, "Selection probability intervals")?;
        writeln!(self.writer, "{:?}", report.cumulative)?;
        writeln!(self.writer, "Best chromosome is {}", report.elite + 1)?;
        for draw in &report.draws {
            writeln!(
                self.writer,
                "u = {} selecting chromosome {}",
                draw.u,
                draw.index + 1
            )?;
        }
        writeln!(self.writer)
    }

    fn write_crossover(&mut self, report: &CrossoverReport) -> io::Result<()> {
        writeln!(self.writer, "Crossover probability {}", report.probability)?;
        let mut pairs = report.pairs.iter().peekable();

        for (i, &u) in report.draws.iter().enumerate() {
            if u < report.probability {
                writeln!(
                    self.writer,
                    "{}: u={} < {} participates",
                    i + 1,
                    u,
                    report.probability
                )?;
            } else {
                writeln!(self.writer, "{}: u={}", i + 1, u)?;
            }

            if let Some(pair) = pairs.next_if(|pair| pair.right == i) {
                writeln!(
                    self.writer,
                    "recombining chromosome {} with chromosome {}:",
                    pair.left + 1,
                    pair.right + 1
                )?;
                writeln!(
                    self.writer,
                    "{} {} point {}",
                    pair.parents.0, pair.parents.1, pair.point
                )?;
                writeln!(
                    self.writer,
                    "result {} {}",
                    pair.children.0, pair.children.1
                )?;
            }
        }

        if let Some(unpaired) = report.unpaired {
            writeln!(
                self.writer,
                "chromosome {} has no partner and is kept as is",
                unpaired + 1
            )?;
        }
        writeln!(self.writer)
    }

    fn write_mutation(&mut self, report: &MutationReport) -> io::Result<()> {
        writeln!(
            self.writer,
            "Mutation probability for each gene {}",
            report.probability
        )?;
        for index in &report.mutated {
            writeln!(self.writer, "Chromosome {} was modified", index + 1)?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> EvolutionObserver for TextReport<W> {
    fn observe(&mut self, event: &EvolutionEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.write_event(event) {
            self.error = Some(error);
        }
    }
}
