use tracing::{debug, trace};

use crate::error::{InvalidInput, SimError, SimResult};
use crate::ranges::RangeTable;
use crate::source::DrawSource;

/// One draw: the number, the job it landed on, and the share of the whole
/// batch's draws accounted for so far.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub number: u32,
    pub job: String,
    /// `sum(count_j / total_draws)` right after this draw. Climbs to 1.0 on
    /// the batch's final draw. Not a per-job value.
    pub running_mass: f64,
}

/// One run of `draws_per_simulation` draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRun {
    pub sequence: Vec<String>,
    pub draws: Vec<DrawRecord>,
}

/// Per-job outcome of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobStats<'a> {
    pub job: &'a str,
    pub count: u64,
    pub probability: f64,
    /// Prefix sum of `probability` in table order.
    pub cumulative_probability: f64,
}

/// Final counts and probabilities, in range-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    jobs: Vec<String>,
    counts: Vec<u64>,
    probabilities: Vec<f64>,
    cumulative_probabilities: Vec<f64>,
    total_draws: u64,
}

impl AggregateResult {
    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = JobStats<'_>> + ExactSizeIterator {
        (0..self.jobs.len()).map(move |i| JobStats {
            job: &self.jobs[i],
            count: self.counts[i],
            probability: self.probabilities[i],
            cumulative_probability: self.cumulative_probabilities[i],
        })
    }

    pub fn get(&self, job: &str) -> Option<JobStats<'_>> {
        self.iter().find(|stats| stats.job == job)
    }

    pub fn count(&self, job: &str) -> Option<u64> {
        self.get(job).map(|s| s.count)
    }

    pub fn probability(&self, job: &str) -> Option<f64> {
        self.get(job).map(|s| s.probability)
    }

    pub fn cumulative_probability(&self, job: &str) -> Option<f64> {
        self.get(job).map(|s| s.cumulative_probability)
    }
}

/// Everything one `run_simulations` call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBatch {
    pub runs: Vec<SimulationRun>,
    pub aggregate: AggregateResult,
}

impl SimulationBatch {
    pub fn sequences(&self) -> impl Iterator<Item = &[String]> {
        self.runs.iter().map(|run| run.sequence.as_slice())
    }

    pub fn details(&self) -> impl Iterator<Item = &[DrawRecord]> {
        self.runs.iter().map(|run| run.draws.as_slice())
    }
}

/// Running per-job counts for a single batch. Indexed like the range table.
#[derive(Debug)]
struct JobTally {
    counts: Vec<u64>,
    total_draws: u64,
}

impl JobTally {
    fn new(num_jobs: usize, total_draws: u64) -> Self {
        Self {
            counts: vec![0; num_jobs],
            total_draws,
        }
    }

    fn record(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    fn running_mass(&self) -> f64 {
        let total = self.total_draws as f64;
        self.counts.iter().map(|&c| c as f64 / total).sum()
    }

    fn finish(self, ranges: &RangeTable) -> AggregateResult {
        let total = self.total_draws as f64;
        let probabilities: Vec<f64> = self.counts.iter().map(|&c| c as f64 / total).collect();

        let mut cumulative_sum = 0.0;
        let cumulative_probabilities = probabilities
            .iter()
            .map(|p| {
                cumulative_sum += p;
                cumulative_sum
            })
            .collect();

        AggregateResult {
            jobs: ranges.jobs().map(str::to_string).collect(),
            counts: self.counts,
            probabilities,
            cumulative_probabilities,
            total_draws: self.total_draws,
        }
    }
}

/// Run `num_simulations` runs of `draws_per_simulation` draws each against
/// `ranges`, drawing numbers in `1..=total_range` from `source`.
///
/// A drawn number that no range owns aborts the whole batch with
/// [`SimError::DataIntegrity`].
pub fn run_simulations<S: DrawSource + ?Sized>(
    ranges: &RangeTable,
    total_range: u32,
    num_simulations: usize,
    draws_per_simulation: usize,
    source: &mut S,
) -> SimResult<SimulationBatch> {
    if total_range == 0 {
        return Err(InvalidInput::NonPositiveCount {
            name: "total_range",
            value: 0,
        }
        .into());
    }
    if num_simulations == 0 {
        return Err(InvalidInput::NonPositiveCount {
            name: "num_simulations",
            value: num_simulations,
        }
        .into());
    }
    if draws_per_simulation == 0 {
        return Err(InvalidInput::NonPositiveCount {
            name: "draws_per_simulation",
            value: draws_per_simulation,
        }
        .into());
    }
    if ranges.is_empty() {
        return Err(InvalidInput::EmptyRangeTable.into());
    }

    let total_draws = (num_simulations as u64).saturating_mul(draws_per_simulation as u64);
    debug!(
        jobs = ranges.len(),
        num_simulations, draws_per_simulation, total_draws, "starting batch"
    );

    let mut tally = JobTally::new(ranges.len(), total_draws);
    let mut runs = Vec::with_capacity(num_simulations);

    for sim in 0..num_simulations {
        let mut run = SimulationRun {
            sequence: Vec::with_capacity(draws_per_simulation),
            draws: Vec::with_capacity(draws_per_simulation),
        };
        for _ in 0..draws_per_simulation {
            let number = source.draw(total_range);
            let index = ranges
                .position_of(number)
                .ok_or_else(|| SimError::DataIntegrity {
                    number,
                    ranges: ranges.clone(),
                })?;
            tally.record(index);

            let job = ranges.job_at(index).to_string();
            let running_mass = tally.running_mass();
            trace!(sim, number, job = %job, running_mass, "draw");

            run.draws.push(DrawRecord {
                number,
                job: job.clone(),
                running_mass,
            });
            run.sequence.push(job);
        }
        runs.push(run);
    }

    let aggregate = tally.finish(ranges);
    debug!(total_draws, "batch finished");

    Ok(SimulationBatch { runs, aggregate })
}
