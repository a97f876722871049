//! Types for the encrypted circuit evaluator test bench.
//!
//! This crate holds the data that crosses the boundary between the harness and
//! whatever engine actually evaluates the circuit: packed inputs, register
//! outputs, execution modes and the [`CircuitEvaluator`] trait itself.

#![expect(missing_docs, reason = "flag and counter names say it all")]

mod gate_count;
mod mode;
mod registers;
mod traits;

pub use gate_count::*;
pub use mode::*;
pub use registers::*;
pub use traits::*;

/// Ordered sequence of single bits as exchanged with the evaluator.
pub type BitVector = bitvec::vec::BitVec;
