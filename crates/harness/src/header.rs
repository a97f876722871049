//! Program header scanner.
//!
//! Assembled programs carry their own I/O shape as comment annotations:
//!
//! ```text
//! # Assembler statistics
//! # 115872 gates
//! # 1024 levels
//! # 2 bootstraps
//! # 34021 registers used
//! # number input1 bits 512
//! # number input2 bits 0
//! # number output1 bits 128
//! ```
//!
//! Each annotation is matched by a keyed rule rather than by its position, so
//! extra statistics lines do not shift anything.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::HarnessError;

/// Marker opening the assembler statistics block.
pub const STATS_MARKER: &str = "# Assembler statistics";

/// A value the header scanner extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    /// Number of registers the assembled program uses.
    Registers,
    /// Bit width of input channel 1.
    Input1,
    /// Bit width of input channel 2.
    Input2,
    /// Bit width of output channel 1.
    Output1,
}

impl HeaderField {
    const COUNT: usize = 4;

    fn idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeaderField::Registers => "registers used",
            HeaderField::Input1 => "input1 bits",
            HeaderField::Input2 => "input2 bits",
            HeaderField::Output1 => "output1 bits",
        };
        f.write_str(s)
    }
}

/// How one annotation is recognized.
struct FieldRule {
    field: HeaderField,
    marker: &'static str,
    /// Only matches after [`STATS_MARKER`] has been seen.
    in_stats: bool,
}

const RULES: [FieldRule; HeaderField::COUNT] = [
    FieldRule {
        field: HeaderField::Registers,
        marker: "registers used",
        in_stats: true,
    },
    FieldRule {
        field: HeaderField::Input1,
        marker: "# number input1 bits",
        in_stats: false,
    },
    FieldRule {
        field: HeaderField::Input2,
        marker: "# number input2 bits",
        in_stats: false,
    },
    FieldRule {
        field: HeaderField::Output1,
        marker: "# number output1 bits",
        in_stats: false,
    },
];

impl FieldRule {
    /// Extracts the integer on a matching line.  The marker text is cut out
    /// first so digits inside it (`input1`) are not mistaken for the value.
    fn parse<T: FromStr>(&self, line: &str) -> Option<T> {
        line.replacen(self.marker, " ", 1)
            .split_whitespace()
            .find_map(|tok| tok.parse::<T>().ok())
    }
}

/// I/O shape of an assembled program, as declared by its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramMetadata {
    register_count: u64,
    input_widths: [usize; 2],
    output_widths: [usize; 1],
}

impl ProgramMetadata {
    /// Creates a new instance.
    pub fn new(register_count: u64, input_widths: [usize; 2], output_widths: [usize; 1]) -> Self {
        Self {
            register_count,
            input_widths,
            output_widths,
        }
    }

    /// Number of registers the program uses.
    pub fn register_count(&self) -> u64 {
        self.register_count
    }

    /// Widths of input channels 1 and 2.
    pub fn input_widths(&self) -> [usize; 2] {
        self.input_widths
    }

    /// Width of the 0-based input channel `idx`, if the header declares it.
    pub fn input_width(&self, idx: usize) -> Option<usize> {
        self.input_widths.get(idx).copied()
    }

    /// Width of output channel 1.
    pub fn output_width(&self) -> usize {
        self.output_widths[0]
    }
}

/// Opens `path` and scans its header.
pub fn scan_header(path: &Path) -> Result<ProgramMetadata, HarnessError> {
    info!("opening {} for test parameters", path.display());

    let file = File::open(path).map_err(|source| HarnessError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    scan_reader(BufReader::new(file))
}

/// Scans a program text stream for its header annotations.
///
/// The whole stream is read; only the first occurrence of each annotation
/// counts.  Reaching the end of the stream is the normal way to stop.  Lines
/// are decoded lossily, so stray non-UTF-8 bytes in the program body are
/// harmless.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<ProgramMetadata, HarnessError> {
    let mut registers: Option<u64> = None;
    // input1, input2, output1
    let mut widths: [Option<usize>; HeaderField::COUNT - 1] = [None; HeaderField::COUNT - 1];
    let mut in_stats = false;

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let bytes = bytes.map_err(|source| HarnessError::Read {
            line: line_no,
            source,
        })?;
        let line = String::from_utf8_lossy(&bytes);

        if line.contains(STATS_MARKER) {
            in_stats = true;
            continue;
        }

        let Some(rule) = RULES
            .iter()
            .find(|r| (in_stats || !r.in_stats) && line.contains(r.marker))
        else {
            continue;
        };

        let malformed = || HarnessError::MalformedHeader {
            field: rule.field,
            line: line_no,
            text: line.to_string(),
        };

        match rule.field {
            HeaderField::Registers => {
                if registers.is_some() {
                    continue;
                }
                let value = rule.parse::<u64>(&line).ok_or_else(malformed)?;
                info!("using {value} registers");
                registers = Some(value);
            }
            field => {
                let slot = &mut widths[field.idx() - 1];
                if slot.is_some() {
                    continue;
                }
                let value = rule.parse::<usize>(&line).ok_or_else(malformed)?;
                match field {
                    HeaderField::Input1 => info!("using {value} bits for input 1"),
                    HeaderField::Input2 => info!("using {value} bits for input 2"),
                    _ => info!("using {value} bits for output 1"),
                }
                *slot = Some(value);
            }
        }
    }

    let width = |field: HeaderField| -> Result<usize, HarnessError> {
        widths[field.idx() - 1].ok_or(HarnessError::MissingHeaderField(field))
    };

    Ok(ProgramMetadata::new(
        registers.ok_or(HarnessError::MissingHeaderField(HeaderField::Registers))?,
        [width(HeaderField::Input1)?, width(HeaderField::Input2)?],
        [width(HeaderField::Output1)?],
    ))
}
