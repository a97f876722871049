//! Scripted evaluator standing in for a real encrypted engine.
//!
//! It answers from the reference catalog instead of running gates, and it
//! refuses any call sequence a real engine would mishandle (input without a
//! reset, clocking with no mode or both modes, verify outside encrypted mode).

#![allow(dead_code, unreachable_pub)]

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ecetb_harness::{Family, cases, hex_to_bits, reverse_bits};
use ecetb_types::{
    BitVector, CircuitEvaluator, EvalMode, GateCounts, Method, Outputs, PackedInput, ParameterSet,
};
use thiserror::Error;

/// Bits per output register the scripted engine hands back.
pub const REGISTER_BITS: usize = 32;

pub const GATES: GateCounts = GateCounts {
    input: 512,
    output: 128,
    not: 1_000,
    and: 10_000,
    or: 2_000,
    xor: 20_000,
};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("set_input called without a reset since the last cycle")]
    NotReset,

    #[error("clock called without input")]
    NoInput,

    #[error("clock called with flags plaintext={plaintext} encrypted={encrypted} verify={verify}")]
    BadMode {
        plaintext: bool,
        encrypted: bool,
        verify: bool,
    },

    #[error("no program loaded")]
    NoProgram,

    #[error("injected clock failure")]
    Injected,
}

/// One call the harness made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ReadProgram(PathBuf),
    Reset,
    SetInput(usize),
    Clock(EvalMode),
}

#[derive(Debug)]
pub struct ScriptedEvaluator {
    pub parameter_set: ParameterSet,
    pub method: Method,
    /// What `read_program` answers for a file it can detect a family for.
    pub accept_program: bool,
    /// Catalog ordinal whose encrypted output gets a flipped bit.
    pub encrypted_fault: Option<usize>,
    /// Catalog ordinal whose plaintext output gets a flipped bit.
    pub plaintext_fault: Option<usize>,
    /// Clock call (0-based) that fails outright.
    pub fail_clock: Option<usize>,
    pub calls: Vec<Call>,
    pub gate_reports: Cell<usize>,

    table: HashMap<BitVector, (usize, BitVector)>,
    dirty: bool,
    plaintext: bool,
    encrypted: bool,
    verify: bool,
    input: Option<BitVector>,
    clocks: usize,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self {
            parameter_set: ParameterSet::default(),
            method: Method::default(),
            accept_program: true,
            encrypted_fault: None,
            plaintext_fault: None,
            fail_clock: None,
            calls: Vec::new(),
            gate_reports: Cell::new(0),
            table: HashMap::new(),
            dirty: false,
            plaintext: false,
            encrypted: false,
            verify: false,
            input: None,
            clocks: 0,
        }
    }

    pub fn clocked_modes(&self) -> Vec<EvalMode> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Clock(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    fn load_family(&mut self, family: Family) {
        self.table = cases(family)
            .map(|case| {
                let mut input = hex_to_bits(case.input_hex).expect("catalog hex");
                reverse_bits(&mut input);
                let mut output = hex_to_bits(case.output_hex).expect("catalog hex");
                reverse_bits(&mut output);
                (input, (case.ordinal, output))
            })
            .collect();
    }
}

impl Default for ScriptedEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitEvaluator for ScriptedEvaluator {
    type Error = ScriptError;

    fn construct(set: ParameterSet, method: Method) -> Result<Self, Self::Error> {
        Ok(Self {
            parameter_set: set,
            method,
            ..Self::new()
        })
    }

    fn read_program(&mut self, path: &Path) -> Result<bool, Self::Error> {
        self.calls.push(Call::ReadProgram(path.to_path_buf()));
        match Family::detect(path) {
            Ok(family) if self.accept_program => {
                self.load_family(family);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn reset(&mut self) {
        self.calls.push(Call::Reset);
        self.dirty = false;
        self.plaintext = false;
        self.encrypted = false;
        self.verify = false;
        self.input = None;
    }

    fn set_plaintext(&mut self, enabled: bool) {
        self.plaintext = enabled;
    }

    fn set_encrypted(&mut self, enabled: bool) {
        self.encrypted = enabled;
    }

    fn set_verify(&mut self, enabled: bool) {
        self.verify = enabled;
    }

    fn set_input(&mut self, input: &PackedInput) -> Result<(), Self::Error> {
        if self.dirty {
            return Err(ScriptError::NotReset);
        }
        let bits = input.channel(0).map(|c| c.to_bitvec()).unwrap_or_default();
        self.calls.push(Call::SetInput(bits.len()));
        self.input = Some(bits);
        Ok(())
    }

    fn clock(&mut self) -> Result<Outputs, Self::Error> {
        if self.table.is_empty() {
            return Err(ScriptError::NoProgram);
        }
        let mode = EvalMode {
            plaintext: self.plaintext,
            encrypted: self.encrypted,
            verify: self.verify,
        };
        if self.plaintext == self.encrypted || (self.verify && !self.encrypted) {
            return Err(ScriptError::BadMode {
                plaintext: self.plaintext,
                encrypted: self.encrypted,
                verify: self.verify,
            });
        }
        let input = self.input.take().ok_or(ScriptError::NoInput)?;

        self.calls.push(Call::Clock(mode));
        let idx = self.clocks;
        self.clocks += 1;
        self.dirty = true;
        if self.fail_clock == Some(idx) {
            return Err(ScriptError::Injected);
        }

        let (ordinal, mut output) = match self.table.get(&input) {
            Some((ordinal, output)) => (Some(*ordinal), output.clone()),
            None => (None, BitVector::repeat(false, REGISTER_BITS)),
        };
        let fault = if self.encrypted {
            self.encrypted_fault
        } else {
            self.plaintext_fault
        };
        if ordinal.is_some() && ordinal == fault {
            let bit = !output[0];
            output.set(0, bit);
        }

        let registers = output
            .chunks(REGISTER_BITS)
            .map(|r| r.to_bitvec())
            .collect::<Vec<_>>();
        Ok(Outputs::new(registers))
    }

    fn report_gate_count(&self) -> GateCounts {
        self.gate_reports.set(self.gate_reports.get() + 1);
        GATES
    }
}

/// Writes an assembled-program stand-in whose header declares the given
/// widths.
pub fn write_program(dir: &Path, name: &str, input1: usize, input2: usize, output1: usize) -> PathBuf {
    let path = dir.join(name);
    let text = format!(
        "\
# {name} assembled for FHE
# Assembler statistics
# 115872 gates
# 1024 levels
# 34021 registers used
# number input1 bits {input1}
# number input2 bits {input2}
# number output1 bits {output1}
R0 = LOAD(In1, 0)
Out0 = STORE(R0)
"
    );
    fs::write(&path, text).expect("write program");
    path
}
