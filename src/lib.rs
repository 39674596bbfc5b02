//! Monte Carlo simulation of job occurrence from relative frequencies.
//!
//! Frequencies are cut into ranges on `1..=99` ([`allocate_ranges`]), uniform
//! draws are mapped back to jobs ([`resolve_job`]), and [`run_simulations`]
//! repeats that over many runs and reports empirical probabilities.

pub mod error;
pub mod frequency;
pub mod ranges;
pub mod report;
pub mod simulate;
pub mod source;

pub use error::{InvalidInput, SimError, SimResult};
pub use frequency::FrequencyTable;
pub use ranges::{JobRange, RangeTable, TOTAL_RANGE, allocate_ranges, resolve_job};
pub use simulate::{
    AggregateResult, DrawRecord, JobStats, SimulationBatch, SimulationRun, run_simulations,
};
pub use source::{DrawSource, RngSource, ScriptedDraws};
