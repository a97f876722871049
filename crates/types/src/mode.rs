//! Execution modes and encryption settings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Flags selecting how the evaluator runs one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalMode {
    /// Perform plaintext logic.
    pub plaintext: bool,
    /// Perform encrypted logic.
    pub encrypted: bool,
    /// Self-check encrypted gates against their plaintext values.
    pub verify: bool,
}

impl EvalMode {
    /// Plaintext reference run.
    pub const PLAINTEXT: Self = Self {
        plaintext: true,
        encrypted: false,
        verify: false,
    };

    /// Encrypted run with verification enabled.
    pub const ENCRYPTED: Self = Self {
        plaintext: false,
        encrypted: true,
        verify: true,
    };

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match (self.plaintext, self.encrypted) {
            (true, false) => "plaintext",
            (false, true) => "encrypted",
            (true, true) => "mixed",
            (false, false) => "idle",
        }
    }
}

/// Error parsing an encryption setting name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseModeError {
    #[error("unknown parameter set {0:?} (expected TOY|STD128|STD128_OPT|STD128Q_LMKCDEY)")]
    ParameterSet(String),

    #[error("unknown method {0:?} (expected AP|GINX|LMKCDEY)")]
    Method(String),
}

/// Encryption parameter set the evaluator is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterSet {
    /// Insecure, for fast functional runs only.
    Toy,
    #[default]
    Std128,
    Std128Opt,
    Std128qLmkcdey,
}

impl ParameterSet {
    /// Returns if this set offers no real security.
    pub fn is_toy(&self) -> bool {
        matches!(self, ParameterSet::Toy)
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterSet::Toy => "TOY",
            ParameterSet::Std128 => "STD128",
            ParameterSet::Std128Opt => "STD128_OPT",
            ParameterSet::Std128qLmkcdey => "STD128Q_LMKCDEY",
        };
        f.write_str(s)
    }
}

impl FromStr for ParameterSet {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TOY" => Ok(ParameterSet::Toy),
            "STD128" => Ok(ParameterSet::Std128),
            "STD128_OPT" => Ok(ParameterSet::Std128Opt),
            "STD128Q_LMKCDEY" => Ok(ParameterSet::Std128qLmkcdey),
            _ => Err(ParseModeError::ParameterSet(s.to_owned())),
        }
    }
}

/// Bootstrapping method the evaluator is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Ap,
    #[default]
    Ginx,
    Lmkcdey,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Ap => "AP",
            Method::Ginx => "GINX",
            Method::Lmkcdey => "LMKCDEY",
        };
        f.write_str(s)
    }
}

impl FromStr for Method {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AP" => Ok(Method::Ap),
            "GINX" => Ok(Method::Ginx),
            "LMKCDEY" => Ok(Method::Lmkcdey),
            _ => Err(ParseModeError::Method(s.to_owned())),
        }
    }
}
