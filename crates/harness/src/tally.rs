//! Pass/fail bookkeeping across a run.

use std::fmt;

/// Outcome of one test case in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Plaintext output matched the reference.
    pub plaintext_passed: bool,
    /// Encrypted output matched the reference.
    pub encrypted_passed: bool,
}

impl RunResult {
    /// Returns if both modes matched.
    pub fn passed(&self) -> bool {
        self.plaintext_passed && self.encrypted_passed
    }
}

/// Running tally for one run.
///
/// Plaintext and encrypted passes are counted independently; the overall
/// verdict is the AND of every individual decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    total_tests: usize,
    plaintext_passed: usize,
    encrypted_passed: usize,
    all_passed: bool,
}

impl Tally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self {
            total_tests: 0,
            plaintext_passed: 0,
            encrypted_passed: 0,
            all_passed: true,
        }
    }

    /// Records the result of one test case.
    pub fn record(&mut self, result: RunResult) {
        self.total_tests += 1;
        if result.plaintext_passed {
            self.plaintext_passed += 1;
        }
        if result.encrypted_passed {
            self.encrypted_passed += 1;
        }
        self.all_passed &= result.passed();
    }

    /// Folds another tally into this one.
    pub fn merge(&mut self, other: &Tally) {
        self.total_tests += other.total_tests;
        self.plaintext_passed += other.plaintext_passed;
        self.encrypted_passed += other.encrypted_passed;
        self.all_passed &= other.all_passed;
    }

    /// Produces the final counts and verdict.
    pub fn finalize(self) -> TallySummary {
        TallySummary {
            total_tests: self.total_tests,
            plaintext_passed: self.plaintext_passed,
            encrypted_passed: self.encrypted_passed,
            all_passed: self.all_passed,
        }
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

/// Final counts of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallySummary {
    /// Test cases executed, across all repetitions.
    pub total_tests: usize,
    /// Cases whose plaintext output matched.
    pub plaintext_passed: usize,
    /// Cases whose encrypted output matched.
    pub encrypted_passed: usize,
    /// Every comparison in every mode matched.
    pub all_passed: bool,
}

impl fmt::Display for TallySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests, {} passed plaintext, {} passed encrypted",
            self.total_tests, self.plaintext_passed, self.encrypted_passed
        )
    }
}
