//! # Observers
//!
//! The launcher narrates each generation through [`EvolutionObserver::observe`]. The
//! events are plain values; observers can print them, collect them or ignore them, and
//! nothing they do feeds back into the run.
//!
//! Order within one generation:
//!
//! 1. `Population` at [`Checkpoint::Initial`]
//! 2. `Selection`, then `Population` at [`Checkpoint::Selected`]
//! 3. `Crossover`, then `Population` at [`Checkpoint::Recombined`]
//! 4. `Mutation`, then `Population` at [`Checkpoint::Final`]
//! 5. `Generation`

use tracing::{debug, trace};

use crate::{
    breeding::{CrossoverReport, MutationReport},
    evolution::state::GenerationStats,
    individual::Individual,
    selection::SelectionReport,
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    /// The population a generation starts from.
    Initial,
    /// After roulette selection.
    Selected,
    /// After crossover.
    Recombined,
    /// After mutation, re-evaluated.
    Final,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EvolutionEvent {
    Population {
        generation: usize,
        checkpoint: Checkpoint,
        individuals: Vec<Individual>,
    },
    Selection {
        generation: usize,
        report: SelectionReport,
    },
    Crossover {
        generation: usize,
        report: CrossoverReport,
    },
    Mutation {
        generation: usize,
        report: MutationReport,
    },
    Generation(GenerationStats),
}

impl EvolutionEvent {
    pub fn generation(&self) -> usize {
        match self {
            EvolutionEvent::Population { generation, .. }
            | EvolutionEvent::Selection { generation, .. }
            | EvolutionEvent::Crossover { generation, .. }
            | EvolutionEvent::Mutation { generation, .. } => *generation,
            EvolutionEvent::Generation(stats) => stats.generation,
        }
    }
}

pub trait EvolutionObserver {
    fn observe(&mut self, event: &EvolutionEvent);

    /// When false the launcher skips building events altogether.
    fn enabled(&self) -> bool {
        true
    }
}

impl EvolutionObserver for () {
    fn observe(&mut self, _event: &EvolutionEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Feeds both observers, skipping whichever is disabled.
impl<A: EvolutionObserver, B: EvolutionObserver> EvolutionObserver for (A, B) {
    fn observe(&mut self, event: &EvolutionEvent) {
        if self.0.enabled() {
            self.0.observe(event);
        }
        if self.1.enabled() {
            self.1.observe(event);
        }
    }

    fn enabled(&self) -> bool {
        self.0.enabled() || self.1.enabled()
    }
}

impl<O: EvolutionObserver + ?Sized> EvolutionObserver for &mut O {
    fn observe(&mut self, event: &EvolutionEvent) {
        (**self).observe(event)
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

/// Keeps every event it sees.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<EvolutionEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Individuals recorded at `checkpoint` of `generation`.
    pub fn population(&self, generation: usize, checkpoint: Checkpoint) -> Option<&[Individual]> {
        self.events.iter().find_map(|event| match event {
            EvolutionEvent::Population {
                generation: g,
                checkpoint: c,
                individuals,
            } if *g == generation && *c == checkpoint => Some(individuals.as_slice()),
            _ => None,
        })
    }

    pub fn selection(&self, generation: usize) -> Option<&SelectionReport> {
        self.events.iter().find_map(|event| match event {
            EvolutionEvent::Selection { generation: g, report } if *g == generation => {
                Some(report)
            }
            _ => None,
        })
    }

    pub fn crossover(&self, generation: usize) -> Option<&CrossoverReport> {
        self.events.iter().find_map(|event| match event {
            EvolutionEvent::Crossover { generation: g, report } if *g == generation => {
                Some(report)
            }
            _ => None,
        })
    }

    pub fn stats(&self) -> Vec<GenerationStats> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EvolutionEvent::Generation(stats) => Some(*stats),
                _ => None,
            })
            .collect()
    }
}

impl EvolutionObserver for RecordingObserver {
    fn observe(&mut self, event: &EvolutionEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards every event to `tracing`: stats at `debug`, everything else at `trace`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl EvolutionObserver for TracingObserver {
    fn observe(&mut self, event: &EvolutionEvent) {
        match event {
            EvolutionEvent::Population {
                generation,
                checkpoint,
                individuals,
            } => trace!(generation, ?checkpoint, size = individuals.len(), "Population"),
            EvolutionEvent::Selection { generation, report } => trace!(
                generation,
                elite = report.elite,
                draws = report.draws.len(),
                uniform_fallback = report.uniform_fallback,
                "Selection"
            ),
            EvolutionEvent::Crossover { generation, report } => trace!(
                generation,
                pairs = report.pairs.len(),
                unpaired = ?report.unpaired,
                "Crossover"
            ),
            EvolutionEvent::Mutation { generation, report } => {
                trace!(generation, mutated = ?report.mutated, "Mutation")
            }
            EvolutionEvent::Generation(stats) => debug!(
                generation = stats.generation,
                max_fitness = stats.max_fitness,
                mean_fitness = stats.mean_fitness,
                "Generation"
            ),
        }
    }

    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::TRACE) || tracing::enabled!(tracing::Level::DEBUG)
    }
}
