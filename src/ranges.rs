use std::fmt;

use tracing::{debug, warn};

use crate::error::SimResult;
use crate::frequency::FrequencyTable;

/// Size of the draw scale: ranges partition `1..=TOTAL_RANGE`.
pub const TOTAL_RANGE: u32 = 99;

/// Closed interval `[start, end]` on the draw scale.
///
/// `start > end` is possible when earlier jobs used up the scale; such a range
/// owns no numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRange {
    pub start: u32,
    pub end: u32,
}

impl JobRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, number: u32) -> bool {
        self.start <= number && number <= self.end
    }

    /// Count of numbers owned, 0 for empty or inverted ranges.
    pub fn len(&self) -> u32 {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for JobRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

/// Job ranges in frequency-table order, plus the scale they were cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable {
    entries: Vec<(String, JobRange)>,
    total_range: u32,
}

impl RangeTable {
    /// Build a table from explicit ranges. No partition checks are made, so
    /// gaps are possible and surface later as unresolved draws.
    pub fn from_ranges<S: Into<String>>(
        ranges: impl IntoIterator<Item = (S, JobRange)>,
        total_range: u32,
    ) -> Self {
        Self {
            entries: ranges
                .into_iter()
                .map(|(job, range)| (job.into(), range))
                .collect(),
            total_range,
        }
    }

    pub fn total_range(&self) -> u32 {
        self.total_range
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, JobRange)> {
        self.entries.iter().map(|(job, range)| (job.as_str(), *range))
    }

    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(job, _)| job.as_str())
    }

    pub fn get(&self, job: &str) -> Option<JobRange> {
        self.entries
            .iter()
            .find(|(name, _)| name == job)
            .map(|(_, range)| *range)
    }

    pub(crate) fn job_at(&self, index: usize) -> &str {
        &self.entries[index].0
    }

    /// Position of the first job whose range holds `number`.
    pub(crate) fn position_of(&self, number: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|(_, range)| range.contains(number))
    }
}

impl fmt::Display for RangeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (job, range)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{job}: {range}")?;
        }
        Ok(())
    }
}

/// Cut `1..=TOTAL_RANGE` into one range per job, sized by frequency share.
///
/// Sizes are `round(freq / total * TOTAL_RANGE)` with ties going to the even
/// neighbour. Ends are clamped to the scale but overflow is not redistributed:
/// trailing jobs can end up empty. The last job always ends at `TOTAL_RANGE`.
pub fn allocate_ranges(frequencies: &FrequencyTable) -> SimResult<RangeTable> {
    frequencies.validate()?;

    let total = frequencies.total() as f64;
    let mut entries = Vec::with_capacity(frequencies.len());
    let mut start: u32 = 1;

    for (job, freq) in frequencies.iter() {
        let proportion = f64::from(freq) / total;
        let size = (proportion * f64::from(TOTAL_RANGE)).round_ties_even() as u32;
        // start >= 1, so this never underflows
        let end = (start + size - 1).min(TOTAL_RANGE);
        entries.push((job.to_string(), JobRange::new(start, end)));
        start = end + 1;
    }

    // last job absorbs rounding drift
    if let Some((_, last)) = entries.last_mut() {
        last.end = TOTAL_RANGE;
    }

    for (job, range) in &entries {
        if range.is_empty() {
            warn!(job = %job, range = %range, "job received an empty range");
        } else {
            debug!(job = %job, range = %range, "allocated range");
        }
    }

    Ok(RangeTable {
        entries,
        total_range: TOTAL_RANGE,
    })
}

/// Job owning `number`, scanning in table order. `None` means the table has a
/// hole at `number`.
pub fn resolve_job(ranges: &RangeTable, number: u32) -> Option<&str> {
    ranges.position_of(number).map(|i| ranges.job_at(i))
}
