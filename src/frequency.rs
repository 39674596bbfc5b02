use crate::error::{InvalidInput, SimResult};

/// Job name to relative frequency, in insertion order.
///
/// The order decides which range each job gets and which job is last, so a
/// plain vector of pairs is used instead of a hashed map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u32)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a job. An existing job keeps its position.
    pub fn insert(&mut self, job: impl Into<String>, frequency: u32) {
        let job = job.into();
        match self.entries.iter_mut().find(|(name, _)| *name == job) {
            Some(entry) => entry.1 = frequency,
            None => self.entries.push((job, frequency)),
        }
    }

    /// Build `J1..Jn` from frequencies given in job order.
    pub fn numbered(frequencies: &[u32]) -> Self {
        let mut table = Self::new();
        for (i, &freq) in frequencies.iter().enumerate() {
            table.insert(format!("J{}", i + 1), freq);
        }
        table
    }

    pub fn get(&self, job: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == job)
            .map(|(_, freq)| *freq)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, freq)| (name.as_str(), *freq))
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, freq)| u64::from(*freq)).sum()
    }

    /// Non-empty and every frequency positive.
    pub fn validate(&self) -> SimResult<()> {
        if self.entries.is_empty() {
            return Err(InvalidInput::EmptyFrequencyTable.into());
        }
        if let Some((job, _)) = self.entries.iter().find(|(_, freq)| *freq == 0) {
            return Err(InvalidInput::NonPositiveFrequency { job: job.clone() }.into());
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (job, freq) in iter {
            table.insert(job, freq);
        }
        table
    }
}
