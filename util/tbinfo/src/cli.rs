use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Test bench inspector - look at program headers and reference vectors
#[derive(Parser, Debug)]
#[command(name = "tbinfo")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Scan an assembled program and print its declared I/O shape
    Header(HeaderCommand),
    /// Print a family's reference vectors
    Vectors(VectorsCommand),
}

#[derive(Parser, Debug)]
pub(crate) struct HeaderCommand {
    /// Assembled program file path
    #[arg(value_name = "PROGRAM")]
    pub(crate) program: PathBuf,
}

#[derive(Parser, Debug)]
pub(crate) struct VectorsCommand {
    /// Circuit family (md5, sha-256)
    #[arg(value_name = "FAMILY")]
    pub(crate) family: String,

    /// Only print this catalog entry
    #[arg(
        short = 'n',
        long = "ordinal",
        value_name = "N",
        help = "Print only the vector with this ordinal"
    )]
    pub(crate) ordinal: Option<usize>,

    /// Also print the bits in evaluator order
    #[arg(short, long, help = "Print evaluator-order bit strings")]
    pub(crate) bits: bool,
}

impl Cli {
    pub(crate) fn parse_args() -> Self {
        Self::parse()
    }
}
