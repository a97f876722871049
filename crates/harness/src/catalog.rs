//! Reference vector catalogs.
//!
//! Each circuit family has a fixed I/O shape and its own closed set of
//! vectors, so the vectors are compiled in rather than read from a side file.
//! A new family gets a new table here.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::HarnessError;

/// Number of reference vectors every family carries.
pub const CASES_PER_FAMILY: usize = 4;

/// All-zero 512-bit block.
const IN_ZEROS: &str = concat!(
    "00000000000000000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000000000000000",
    "0000"
);

/// Bytes `00` through `3f`.
const IN_COUNTING: &str = concat!(
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e",
    "1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d",
    "3e3f"
);

/// All-ones 512-bit block.
const IN_ONES: &str = concat!(
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    "ffff"
);

/// Leading hex digits of pi.
const IN_PI: &str = concat!(
    "243f6a8885a308d313198a2e03707344a4093822299f31d0082efa98ec4e6c",
    "89452821e638d01377be5466cf34e90c6cc0ac29b7c97c50dd3f84d5b5b547",
    "0917"
);

const MD5_VECTORS: [(&str, &str); CASES_PER_FAMILY] = [
    (IN_ZEROS, "ac1d1f03d08ea56eb767ab1f91773174"),
    (IN_COUNTING, "cad94491c9e401d9385bfc721ef55f62"),
    (IN_ONES, "b487195651913e494b55c6bddf405c01"),
    (IN_PI, "3715f568f422db75cc8d65e11764ff01"),
];

const SHA256_VECTORS: [(&str, &str); CASES_PER_FAMILY] = [
    (
        IN_ZEROS,
        "da5698be17b9b46962335799779fbeca8ce5d491c0d26243bafef9ea1837a9d8",
    ),
    (
        IN_COUNTING,
        "fc99a2df88f42a7a7bb9d18033cdc6a20256755f9d5b9a5044a9cc315abe84a7",
    ),
    (
        IN_ONES,
        "ef0c748df4da50a8d6c43c013edc3ce76c9d9fa9a1458ade56eb86c0a64492d2",
    ),
    (
        IN_PI,
        "cf0ae4eb67d38ffeb94068984b22abde4e92bc548d14585e48dca8882d7b09ce",
    ),
];

/// A circuit family with its own reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// MD5 compression function.
    Md5,
    /// SHA-256 compression function.
    Sha256,
}

/// Fixed I/O shape of a family, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyShape {
    /// Width of input channel 1.
    pub input1_bits: usize,
    /// Width of input channel 2, unused by every current family.
    pub input2_bits: usize,
    /// Width of output channel 1.
    pub output1_bits: usize,
}

impl Family {
    /// Every family with a catalog.
    pub const ALL: [Family; 2] = [Family::Md5, Family::Sha256];

    /// Works out the family from a program file name.
    pub fn detect(program: &Path) -> Result<Self, HarnessError> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.contains("md5") {
            Ok(Family::Md5)
        } else if name.contains("sha-256") || name.contains("sha256") {
            Ok(Family::Sha256)
        } else {
            Err(HarnessError::UnsupportedFamily(
                program.display().to_string(),
            ))
        }
    }

    /// Returns the family's fixed I/O shape.
    pub fn shape(&self) -> FamilyShape {
        match self {
            Family::Md5 => FamilyShape {
                input1_bits: 512,
                input2_bits: 0,
                output1_bits: 128,
            },
            Family::Sha256 => FamilyShape {
                input1_bits: 512,
                input2_bits: 0,
                output1_bits: 256,
            },
        }
    }

    fn vectors(&self) -> &'static [(&'static str, &'static str); CASES_PER_FAMILY] {
        match self {
            Family::Md5 => &MD5_VECTORS,
            Family::Sha256 => &SHA256_VECTORS,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Md5 => f.write_str("md5"),
            Family::Sha256 => f.write_str("sha-256"),
        }
    }
}

impl FromStr for Family {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Family::Md5),
            "sha-256" | "sha256" => Ok(Family::Sha256),
            _ => Err(HarnessError::UnsupportedFamily(s.to_owned())),
        }
    }
}

/// One reference input/output pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    /// Family the vector belongs to.
    pub family: Family,
    /// Position in the family's catalog.
    pub ordinal: usize,
    /// Input channel 1, reference order.
    pub input_hex: &'static str,
    /// Output channel 1, reference order.
    pub output_hex: &'static str,
}

/// Looks up a family's vector by ordinal.
pub fn lookup(family: Family, ordinal: usize) -> Result<TestCase, HarnessError> {
    let (input_hex, output_hex) = family
        .vectors()
        .get(ordinal)
        .copied()
        .ok_or(HarnessError::UnsupportedCase { family, ordinal })?;

    Ok(TestCase {
        family,
        ordinal,
        input_hex,
        output_hex,
    })
}

/// Looks up a vector by family name.
pub fn lookup_by_name(family: &str, ordinal: usize) -> Result<TestCase, HarnessError> {
    lookup(family.parse()?, ordinal)
}

/// Gets an iterator over a family's whole catalog, in ordinal order.
pub fn cases(family: Family) -> impl Iterator<Item = TestCase> {
    family
        .vectors()
        .iter()
        .enumerate()
        .map(move |(ordinal, &(input_hex, output_hex))| TestCase {
            family,
            ordinal,
            input_hex,
            output_hex,
        })
}
