use std::time::Duration;

use buttons::{ButtonTable, HashState};

use crate::error::ConfigError;

/// The well-known pair of target hashes (reached by `TUXSUXCUX`).
pub const DEFAULT_TARGET: HashState = HashState {
    hash1: 0x1eca8e89,
    hash2: 0xad2dc1d6,
};

/// Everything a single solver run needs. Fixed for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of button presses (`N`).
    pub length: usize,
    /// How many times the base pattern repeats (`R`); must divide `length`.
    pub repetitions: usize,
    pub target: HashState,
    pub table: ButtonTable,
    /// Passed to Z3 as its `timeout` parameter.
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::new(9, 1, DEFAULT_TARGET)
    }
}

impl SolverConfig {
    pub fn new(length: usize, repetitions: usize, target: HashState) -> Self {
        SolverConfig {
            length,
            repetitions,
            target,
            table: ButtonTable::default(),
            timeout: None,
        }
    }

    pub fn with_table(mut self, table: ButtonTable) -> Self {
        self.table = table;
        self
    }

    /// Replaces the table with one built from `(x, y)` pairs in button order.
    pub fn with_table_pairs(self, pairs: &[(u32, u32)]) -> Result<Self, ConfigError> {
        Ok(self.with_table(ButtonTable::from_pairs(pairs)?))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if self.length % self.repetitions != 0 {
            return Err(ConfigError::UnevenRepetition {
                length: self.length,
                repetitions: self.repetitions,
            });
        }
        Ok(())
    }

    /// Length of the repeated base pattern, `N / R`.
    pub fn period(&self) -> usize {
        self.length / self.repetitions
    }
}
