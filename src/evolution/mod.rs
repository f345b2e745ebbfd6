pub mod launcher;
pub mod observer;
pub mod options;
pub mod report;
pub mod state;

pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use observer::{
    Checkpoint, EvolutionEvent, EvolutionObserver, RecordingObserver, TracingObserver,
};
pub use options::{GaOptions, GaOptionsBuilder, LogLevel};
pub use report::TextReport;
pub use state::{GenerationStats, RunState};
