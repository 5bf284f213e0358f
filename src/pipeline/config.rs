use std::fmt;

use super::error::PipelineError;
use crate::engine::Pacing;

/// Budget used when no run count is given
pub const DEFAULT_RUNS: u64 = 10_000;

/// Validated pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    producers: usize,
    consumers: usize,
    buffer_size: usize,
    runs: u64,
    pacing: Pacing,
}

impl PipelineConfig {
    /// Create a configuration
    ///
    /// Producers, consumers and buffer size must be positive. A run budget of
    /// zero is allowed: consumers then exit as soon as every producer has.
    pub fn new(
        producers: usize,
        consumers: usize,
        buffer_size: usize,
        runs: u64,
    ) -> Result<Self, PipelineError> {
        for (name, value) in [
            ("producers", producers),
            ("consumers", consumers),
            ("buffer size", buffer_size),
        ] {
            if value == 0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        Ok(Self {
            producers,
            consumers,
            buffer_size,
            runs,
            pacing: Pacing::none(),
        })
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn producers(&self) -> usize {
        self.producers
    }

    pub fn consumers(&self) -> usize {
        self.consumers
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p: {}", self.producers)?;
        writeln!(f, "c: {}", self.consumers)?;
        writeln!(f, "buffer_size: {}", self.buffer_size)?;
        write!(f, "runs: {}", self.runs)
    }
}
