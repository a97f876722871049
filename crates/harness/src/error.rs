//! Harness error type.

use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Family;
use crate::header::HeaderField;

/// Errors that stop a test run.
///
/// Output mismatches are not errors; they are recorded in the tally and the
/// run continues.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The program file could not be opened.
    #[error(
        "cannot open program file {}: {source} (the assembled program must exist before it can be tested)",
        path.display()
    )]
    Open {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading the program file failed part way through.
    #[error("error reading program header at line {line}: {source}")]
    Read {
        /// 1-based line that failed to read.
        line: usize,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A header annotation was recognized but its value could not be parsed.
    #[error("malformed {field} annotation at line {line}: {text:?}")]
    MalformedHeader {
        /// Field the line was annotating.
        field: HeaderField,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// The header ended without declaring a required field.
    #[error("program header does not declare {0}")]
    MissingHeaderField(HeaderField),

    /// A reference vector contained a non-hex character.
    #[error("invalid hex digit {ch:?} at position {pos} of {what}")]
    InvalidHex {
        /// Which vector was being decoded.
        what: String,
        /// Character offset of the bad digit.
        pos: usize,
        /// The bad digit.
        ch: char,
    },

    /// A vector's width disagrees with what the program header declares.
    #[error("{what} is {actual} bits but the program declares {expected}")]
    WidthMismatch {
        /// Which vector or channel was checked.
        what: String,
        /// Width declared by the program header.
        expected: usize,
        /// Width actually found.
        actual: usize,
    },

    /// No catalog exists for the program.
    #[error("cannot generate test input for program {0:?}")]
    UnsupportedFamily(String),

    /// Catalog lookup for an ordinal the family does not have.
    #[error("bad {family} test case number: {ordinal}")]
    UnsupportedCase {
        /// Family that was looked up.
        family: Family,
        /// Requested ordinal.
        ordinal: usize,
    },

    /// The evaluator refused the program file.
    #[error("error parsing program file {}", .0.display())]
    ProgramLoad(PathBuf),

    /// The evaluator itself failed.
    #[error("evaluator failed during {stage}: {source}")]
    Evaluator {
        /// Which evaluator operation failed.
        stage: &'static str,
        /// Error reported by the evaluator.
        source: Box<dyn Error + Send + Sync + 'static>,
    },
}

impl HarnessError {
    /// Wraps an evaluator error raised during `stage`.
    pub fn evaluator<E>(stage: &'static str, err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        HarnessError::Evaluator {
            stage,
            source: Box::new(err),
        }
    }
}
