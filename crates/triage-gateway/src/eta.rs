use rand::Rng;
use triage_core::{TriageError, TriageResult};

/// Inclusive range of arrival estimates, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtaRange {
    min: u32,
    max: u32,
}

impl Default for EtaRange {
    fn default() -> Self {
        Self { min: 10, max: 30 }
    }
}

impl EtaRange {
    /// Creates a range; `min` must not exceed `max`.
    pub fn new(min: u32, max: u32) -> TriageResult<Self> {
        if min > max {
            return Err(TriageError::Config(format!(
                "ETA range is empty: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound in minutes.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound in minutes.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Draw an estimate uniformly from the range.
    pub fn sample(&self) -> u32 {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}
