//! Variation operators applied after selection: crossover first, then mutation.
pub mod crossover;
pub mod mutation;

pub use crossover::{CrossoverOutcome, CrossoverPair, CrossoverReport, SinglePointCrossover};
pub use mutation::{BitFlipMutation, MutationOutcome, MutationReport};
