//! Whole-catalog test runs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ecetb_types::{CircuitEvaluator, Method, ParameterSet};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::catalog::{self, Family};
use crate::driver::{PreparedCase, prepare_case, run_prepared};
use crate::error::HarnessError;
use crate::header::{ProgramMetadata, scan_header};
use crate::tally::{Tally, TallySummary};

/// Default number of times the catalog is run.
pub const DEFAULT_REPETITIONS: u32 = 10;

/// Settings for one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Assembled program to test.
    pub program: PathBuf,
    /// How many times the whole catalog is rerun.
    pub repetitions: u32,
    /// Encryption parameter set for the evaluator.
    pub parameter_set: ParameterSet,
    /// Bootstrapping method for the evaluator.
    pub method: Method,
}

impl SuiteConfig {
    /// Creates a config for `program` with default settings.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repetitions: DEFAULT_REPETITIONS,
            parameter_set: ParameterSet::default(),
            method: Method::default(),
        }
    }

    /// Sets how many times the catalog is rerun.
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the encryption parameter set.
    pub fn with_parameter_set(mut self, parameter_set: ParameterSet) -> Self {
        self.parameter_set = parameter_set;
        self
    }

    /// Sets the bootstrapping method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

/// Everything worked out about a program before the evaluator is touched.
#[derive(Debug, Clone)]
pub struct SuitePlan {
    program: PathBuf,
    metadata: ProgramMetadata,
    family: Family,
    cases: Vec<PreparedCase>,
    repetitions: u32,
}

impl SuitePlan {
    /// Scans the program header, picks the catalog and decodes every vector.
    ///
    /// All width checks happen here, so a bad configuration fails before any
    /// case has run.
    pub fn load(config: &SuiteConfig) -> Result<Self, HarnessError> {
        let metadata = scan_header(&config.program)?;
        let family = Family::detect(&config.program)?;
        info!("{family} program");

        let shape = family.shape();
        let input2 = metadata.input_width(1).unwrap_or_default();
        if input2 != shape.input2_bits {
            return Err(HarnessError::WidthMismatch {
                what: format!("{family} input 2"),
                expected: input2,
                actual: shape.input2_bits,
            });
        }

        let cases = catalog::cases(family)
            .map(|case| prepare_case(&metadata, &case))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            program: config.program.clone(),
            metadata,
            family,
            cases,
            repetitions: config.repetitions,
        })
    }

    /// Program the plan was built for.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Header values of the program.
    pub fn metadata(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Catalog the program is tested against.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Number of test cases a full run executes.
    pub fn total_cases(&self) -> u64 {
        self.cases.len() as u64 * u64::from(self.repetitions)
    }

    /// Loads the program into `evaluator` and runs the catalog
    /// `repetitions` times.
    pub fn execute<E: CircuitEvaluator>(&self, evaluator: &mut E) -> anyhow::Result<TallySummary> {
        let loaded = evaluator
            .read_program(&self.program)
            .map_err(|e| HarnessError::evaluator("read_program", e))?;
        if !loaded {
            return Err(HarnessError::ProgramLoad(self.program.clone()).into());
        }

        let pb = ProgressBar::new(self.total_cases());
        pb.set_style(
            ProgressStyle::with_template(
                "[{bar:40.cyan/blue}] {pos}/{len} cases | {msg} | {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░"),
        );

        let mut tally = Tally::new();
        let mut gates_reported = false;
        for rep in 0..self.repetitions {
            info!("test {rep}");
            for prepared in &self.cases {
                pb.set_message(format!("{} #{}", self.family, prepared.case.ordinal));
                let result = run_prepared(evaluator, prepared, !gates_reported).with_context(
                    || {
                        format!(
                            "running {} case {} (repetition {rep})",
                            self.family, prepared.case.ordinal
                        )
                    },
                )?;
                gates_reported = true;
                tally.record(result);
                pb.inc(1);
            }
        }
        pb.finish_and_clear();

        let summary = tally.finalize();
        info!("# tests total: {}", summary.total_tests);
        info!("# passed plaintext: {}", summary.plaintext_passed);
        info!("# passed encrypted: {}", summary.encrypted_passed);
        if summary.all_passed {
            info!("{} passes", self.program.display());
        } else {
            warn!("{} fails", self.program.display());
        }

        Ok(summary)
    }
}

/// Constructs an evaluator and runs the whole catalog against `config.program`.
///
/// Returns the overall verdict.  Setup problems (unreadable program, width
/// disagreements, no catalog for the program) come back as errors before any
/// case runs; output mismatches only flip the verdict.
pub fn run_suite<E: CircuitEvaluator>(config: &SuiteConfig) -> anyhow::Result<bool> {
    let plan = SuitePlan::load(config)?;

    if config.parameter_set.is_toy() {
        warn!("TOY security used");
    }
    info!(
        set = %config.parameter_set,
        method = %config.method,
        "generating evaluator context"
    );
    let mut evaluator = E::construct(config.parameter_set, config.method)
        .map_err(|e| HarnessError::evaluator("construct", e))?;

    let summary = plan.execute(&mut evaluator)?;
    Ok(summary.all_passed)
}

/// Like [`run_suite`] but with a caller-owned evaluator, returning the full
/// tally.
pub fn run_suite_with<E: CircuitEvaluator>(
    evaluator: &mut E,
    config: &SuiteConfig,
) -> anyhow::Result<TallySummary> {
    SuitePlan::load(config)?.execute(evaluator)
}
