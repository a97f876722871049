//! Gate census reported by an evaluator.

use std::fmt;

/// Number of gates of each kind executed during the last cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateCounts {
    pub input: u64,
    pub output: u64,
    pub not: u64,
    pub and: u64,
    pub or: u64,
    pub xor: u64,
}

impl GateCounts {
    /// Get total number of gates
    pub fn total(&self) -> u64 {
        self.input + self.output + self.not + self.and + self.or + self.xor
    }
}

impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input {} output {} not {} and {} or {} xor {}",
            self.input, self.output, self.not, self.and, self.or, self.xor
        )
    }
}
