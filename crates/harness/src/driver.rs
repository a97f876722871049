//! Dual-mode execution of a single test case.

use bitvec::slice::BitSlice;
use ecetb_types::{BitVector, CircuitEvaluator, EvalMode, PackedInput};
use tracing::{debug, info, warn};

use crate::catalog::TestCase;
use crate::codec::{render_msb_first, to_evaluator_order, to_reference_hex};
use crate::error::HarnessError;
use crate::header::ProgramMetadata;
use crate::tally::RunResult;

/// A test case decoded, width-checked and put in evaluator order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCase {
    /// The catalog entry this came from.
    pub case: TestCase,
    /// Input channel 1 bits, evaluator order.
    pub input: BitVector,
    /// Reference output bits, evaluator order.
    pub expected: BitVector,
}

/// Decodes a catalog entry against the program's declared widths.
pub fn prepare_case(
    metadata: &ProgramMetadata,
    case: &TestCase,
) -> Result<PreparedCase, HarnessError> {
    let input_width = metadata.input_width(0).unwrap_or_default();
    let input = to_evaluator_order(
        case.input_hex,
        input_width,
        &format!("{} input 1 (case {})", case.family, case.ordinal),
    )?;
    let expected = to_evaluator_order(
        case.output_hex,
        metadata.output_width(),
        &format!("{} output 1 (case {})", case.family, case.ordinal),
    )?;

    Ok(PreparedCase {
        case: *case,
        input,
        expected,
    })
}

/// Runs a catalog entry through the evaluator in both modes.
///
/// If `report_gates` is set the evaluator's gate census is logged after the
/// plaintext pass.
pub fn run_case<E: CircuitEvaluator>(
    evaluator: &mut E,
    metadata: &ProgramMetadata,
    case: &TestCase,
    report_gates: bool,
) -> Result<RunResult, HarnessError> {
    let prepared = prepare_case(metadata, case)?;
    run_prepared(evaluator, &prepared, report_gates)
}

/// Runs an already prepared case through the evaluator in both modes.
///
/// Mismatches are logged and returned in the result, never as errors.
pub fn run_prepared<E: CircuitEvaluator>(
    evaluator: &mut E,
    prepared: &PreparedCase,
    report_gates: bool,
) -> Result<RunResult, HarnessError> {
    let case = &prepared.case;
    info!(family = %case.family, ordinal = case.ordinal, "subtest");
    debug!("input 1: {}", case.input_hex);

    let input = PackedInput::single(prepared.input.clone());

    let plain = run_pass(evaluator, EvalMode::PLAINTEXT, &input)?;
    if report_gates {
        let counts = evaluator.report_gate_count();
        info!("gate count: {counts}");
    }
    let plaintext_passed = check_output(case, EvalMode::PLAINTEXT, &plain, &prepared.expected);

    let enc = run_pass(evaluator, EvalMode::ENCRYPTED, &input)?;
    let encrypted_passed = check_output(case, EvalMode::ENCRYPTED, &enc, &prepared.expected);

    Ok(RunResult {
        plaintext_passed,
        encrypted_passed,
    })
}

/// Resets the evaluator, runs one cycle in `mode` and flattens the output
/// registers.
pub fn run_pass<E: CircuitEvaluator>(
    evaluator: &mut E,
    mode: EvalMode,
    input: &PackedInput,
) -> Result<BitVector, HarnessError> {
    info!("executing {} circuit", mode.label());

    evaluator.reset();
    evaluator.configure(mode);
    evaluator
        .set_input(input)
        .map_err(|e| HarnessError::evaluator("set_input", e))?;
    let outputs = evaluator
        .clock()
        .map_err(|e| HarnessError::evaluator("clock", e))?;

    debug!(
        registers = outputs.num_registers(),
        bits = outputs.total_bits(),
        "program done"
    );
    Ok(outputs.flatten())
}

/// Compares an output against the reference over the full declared width.
///
/// Different lengths never match; nothing is padded or truncated.
pub fn outputs_match(actual: &BitSlice, expected: &BitSlice) -> bool {
    actual.len() == expected.len() && actual == expected
}

fn check_output(case: &TestCase, mode: EvalMode, actual: &BitSlice, expected: &BitSlice) -> bool {
    if outputs_match(actual, expected) {
        info!(mode = mode.label(), "output match");
        return true;
    }

    let width = actual.len().max(expected.len());
    warn!(
        family = %case.family,
        ordinal = case.ordinal,
        mode = mode.label(),
        actual_bits = actual.len(),
        expected_bits = expected.len(),
        "output does not match"
    );
    warn!("  computed: {}", render_msb_first(actual, width));
    warn!("  expected: {}", render_msb_first(expected, width));
    warn!(
        "  computed hex {} expected hex {}",
        to_reference_hex(actual),
        to_reference_hex(expected)
    );
    for idx in (0..width).rev() {
        let a = actual.get(idx).map(|b| *b);
        let e = expected.get(idx).map(|b| *b);
        if a != e {
            debug!(index = idx, computed = ?a, expected = ?e, "bit differs");
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use bitvec::bitvec;
    use bitvec::order::Lsb0;

    use std::cell::Cell;
    use std::convert::Infallible;
    use std::path::Path;

    use ecetb_types::{GateCounts, Method, Outputs, ParameterSet};

    use super::*;
    use crate::catalog::{Family, lookup};

    /// Echoes its input back as a single register.
    #[derive(Debug, Default)]
    struct EchoEvaluator {
        input: BitVector,
        gate_reports: Cell<usize>,
    }

    impl CircuitEvaluator for EchoEvaluator {
        type Error = Infallible;

        fn construct(_: ParameterSet, _: Method) -> Result<Self, Infallible> {
            Ok(Self::default())
        }

        fn read_program(&mut self, _: &Path) -> Result<bool, Infallible> {
            Ok(true)
        }

        fn reset(&mut self) {
            self.input.clear();
        }

        fn set_plaintext(&mut self, _: bool) {}

        fn set_encrypted(&mut self, _: bool) {}

        fn set_verify(&mut self, _: bool) {}

        fn set_input(&mut self, input: &PackedInput) -> Result<(), Infallible> {
            self.input = input.channel(0).map(|c| c.to_bitvec()).unwrap_or_default();
            Ok(())
        }

        fn clock(&mut self) -> Result<Outputs, Infallible> {
            Ok(Outputs::new(vec![self.input.clone()]))
        }

        fn report_gate_count(&self) -> GateCounts {
            self.gate_reports.set(self.gate_reports.get() + 1);
            GateCounts::default()
        }
    }

    fn md5_meta() -> ProgramMetadata {
        ProgramMetadata::new(100, [512, 0], [128])
    }

    #[test]
    fn test_prepare_case_reverses_both_vectors() {
        let case = lookup(Family::Md5, 0).unwrap();
        let prepared = prepare_case(&md5_meta(), &case).unwrap();

        assert_eq!(prepared.input.len(), 512);
        assert!(prepared.input.not_any());
        assert_eq!(prepared.expected.len(), 128);
        assert_eq!(
            to_reference_hex(&prepared.expected),
            "ac1d1f03d08ea56eb767ab1f91773174"
        );
        // 0x...74 ends in bits 0100, which land first after reversal
        assert_eq!(prepared.expected[..4].to_bitvec(), bitvec![0, 0, 1, 0]);
    }

    #[test]
    fn test_prepare_case_input_width_mismatch() {
        let case = lookup(Family::Md5, 1).unwrap();
        let meta = ProgramMetadata::new(100, [256, 0], [128]);
        assert!(matches!(
            prepare_case(&meta, &case).unwrap_err(),
            HarnessError::WidthMismatch {
                expected: 256,
                actual: 512,
                ..
            }
        ));
    }

    #[test]
    fn test_prepare_case_output_width_mismatch() {
        let case = lookup(Family::Sha256, 0).unwrap();
        assert!(matches!(
            prepare_case(&md5_meta(), &case).unwrap_err(),
            HarnessError::WidthMismatch {
                expected: 128,
                actual: 256,
                ..
            }
        ));
    }

    #[test]
    fn test_outputs_match_requires_equal_length() {
        let expected = bitvec![1, 0, 1, 1];
        assert!(outputs_match(&bitvec![1, 0, 1, 1], &expected));
        assert!(!outputs_match(&bitvec![1, 0, 1], &expected));
        assert!(!outputs_match(&bitvec![1, 0, 1, 1, 0], &expected));
        assert!(!outputs_match(&bitvec![1, 0, 0, 1], &expected));
    }

    #[test]
    fn test_gate_count_queried_without_subscriber() {
        // no tracing subscriber is installed in unit tests
        let meta = ProgramMetadata::new(100, [512, 0], [512]);
        let case = TestCase {
            family: Family::Md5,
            ordinal: 0,
            input_hex: lookup(Family::Md5, 0).unwrap().input_hex,
            output_hex: lookup(Family::Md5, 0).unwrap().input_hex,
        };
        let prepared = prepare_case(&meta, &case).unwrap();
        let mut evaluator = EchoEvaluator::default();

        let result = run_prepared(&mut evaluator, &prepared, false).unwrap();
        assert!(result.passed());
        assert_eq!(evaluator.gate_reports.get(), 0);

        run_prepared(&mut evaluator, &prepared, true).unwrap();
        assert_eq!(evaluator.gate_reports.get(), 1);
    }
}
