pub mod roulette;

pub use roulette::{
    DegeneratePolicy, RouletteSelection, SelectionDraw, SelectionOutcome, SelectionReport,
};
