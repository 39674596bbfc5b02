//! Plain-text rendering of ranges and batch results.
//!
//! Tables are `;`-separated, one row per line, so they paste straight into a
//! spreadsheet.

use noisy_float::prelude::*;

use crate::ranges::RangeTable;
use crate::simulate::{AggregateResult, JobStats, SimulationBatch};

pub fn render_ranges(ranges: &RangeTable) -> String {
    ranges
        .iter()
        .map(|(job, range)| format!("{job}: {range}\n"))
        .collect()
}

pub fn render_probabilities(aggregate: &AggregateResult) -> String {
    let rows: String = aggregate
        .iter()
        .map(|stats| {
            format!(
                "{}; {:.4}; {:.4};\n",
                stats.job, stats.probability, stats.cumulative_probability
            )
        })
        .collect();
    format!("Job; Probability; Cumulative Probability;\n{rows}")
}

/// Per-run draw tables. The range column is looked up in `ranges` at render
/// time rather than stored on the draw.
pub fn render_details(batch: &SimulationBatch, ranges: &RangeTable) -> String {
    let mut out = String::new();
    for (i, draws) in batch.details().enumerate() {
        out.push_str(&format!("Simulation {} Details\n", i + 1));
        out.push_str("Random Number; Job; Running Probability; Range;\n");
        for record in draws {
            let range = ranges
                .get(&record.job)
                .map_or_else(|| "?".to_string(), |r| r.to_string());
            out.push_str(&format!(
                "{}; {}; {:.4}; {};\n",
                record.number, record.job, record.running_mass, range
            ));
        }
    }
    out
}

pub fn render_sequences(batch: &SimulationBatch) -> String {
    batch
        .sequences()
        .enumerate()
        .map(|(i, sequence)| {
            let jobs: String = sequence.iter().map(|job| format!(" {job};")).collect();
            format!("Sim {};{jobs}\n", i + 1)
        })
        .collect()
}

/// Job with the highest empirical probability; ties go to the earlier job.
pub fn most_frequent(aggregate: &AggregateResult) -> Option<JobStats<'_>> {
    // max_by_key keeps the last maximum, so walk backwards
    aggregate.iter().rev().max_by_key(|s| n64(s.probability))
}
