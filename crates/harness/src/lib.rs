//! Known-answer test bench for encrypted circuit evaluators.
//!
//! Given an assembled program, the harness reads the I/O widths from its
//! header, picks the reference catalog for the program's circuit family and
//! runs every vector through a [`CircuitEvaluator`](ecetb_types::CircuitEvaluator)
//! twice: once in plaintext and once under encryption.  Both outputs are
//! compared against the reference and tallied.
//!
//! [`run_suite`] is the usual entry point.

mod catalog;
mod codec;
mod driver;
mod error;
mod header;
mod suite;
mod tally;

pub use catalog::*;
pub use codec::*;
pub use driver::*;
pub use error::*;
pub use header::*;
pub use suite::*;
pub use tally::*;
