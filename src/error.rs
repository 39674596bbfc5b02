use crate::ranges::RangeTable;

/// Rejected caller input. Raised before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("frequency table is empty")]
    EmptyFrequencyTable,

    #[error("job {job} has frequency 0, frequencies must be positive")]
    NonPositiveFrequency { job: String },

    #[error("{name} must be at least 1, got {value}")]
    NonPositiveCount { name: &'static str, value: usize },

    #[error("range table is empty")]
    EmptyRangeTable,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("drawn number {number} is not owned by any job range ({ranges})")]
    DataIntegrity { number: u32, ranges: RangeTable },
}

pub type SimResult<T> = Result<T, SimError>;
