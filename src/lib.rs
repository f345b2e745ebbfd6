pub mod breeding;
pub mod chromosome;
pub mod encoding;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod objective;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use encoding::Encoder;
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{EvolutionLauncher, EvolutionResult, GaOptions};
pub use objective::{Objective, Quadratic};
