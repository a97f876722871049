//! Evaluator seam trait.

use std::error::Error;
use std::path::Path;

use crate::{EvalMode, GateCounts, Method, Outputs, PackedInput, ParameterSet};

/// An engine that can run a gate-level program in plaintext and under
/// homomorphic encryption.
///
/// The harness owns one instance for a whole run and drives it through
/// `reset` → configure → `set_input` → `clock` for every pass.  Implementations
/// must make `reset` clear everything a previous cycle left behind (register
/// and wire state, gate counters and mode flags), since the harness relies on it
/// to keep passes independent.
pub trait CircuitEvaluator {
    /// Error type for whatever errors might happen.
    type Error: Error + Sync + Send + 'static;

    /// Builds an evaluator, generating whatever keys the parameter set and
    /// method need.
    fn construct(set: ParameterSet, method: Method) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Loads an assembled program.  Returns `Ok(false)` if the program could
    /// be read but not understood.
    fn read_program(&mut self, path: &Path) -> Result<bool, Self::Error>;

    /// Clears all per-cycle state and mode flags.
    fn reset(&mut self);

    fn set_plaintext(&mut self, enabled: bool);

    fn set_encrypted(&mut self, enabled: bool);

    fn set_verify(&mut self, enabled: bool);

    /// Submits the input bits for the next cycle.
    fn set_input(&mut self, input: &PackedInput) -> Result<(), Self::Error>;

    /// Runs one evaluation cycle and returns the output registers in order.
    fn clock(&mut self) -> Result<Outputs, Self::Error>;

    /// Returns the gate census of the last cycle.
    fn report_gate_count(&self) -> GateCounts;

    /// Applies all three mode flags at once.
    fn configure(&mut self, mode: EvalMode) {
        self.set_plaintext(mode.plaintext);
        self.set_encrypted(mode.encrypted);
        self.set_verify(mode.verify);
    }
}
