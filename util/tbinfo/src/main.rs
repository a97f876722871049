//! Inspection tool for the encrypted circuit test bench.

mod cli;

use anyhow::Context;
use bitvec::slice::BitSlice;
use cli::{Cli, Command, HeaderCommand, VectorsCommand};
use ecetb_harness::{Family, TestCase, cases, lookup, scan_header, to_evaluator_order};
use mimalloc::MiMalloc;
use tracing::debug;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Cli::parse_args();
    debug!(?args, "parsed arguments");

    match args.command {
        Command::Header(header_args) => run_header(header_args),
        Command::Vectors(vectors_args) => run_vectors(vectors_args),
    }
}

fn run_header(args: HeaderCommand) -> anyhow::Result<()> {
    let meta = scan_header(&args.program)?;
    let [input1, input2] = meta.input_widths();

    println!("Program:        {}", args.program.display());
    println!("Registers used: {}", meta.register_count());
    println!("Input 1 bits:   {input1}");
    println!("Input 2 bits:   {input2}");
    println!("Output 1 bits:  {}", meta.output_width());
    match Family::detect(&args.program) {
        Ok(family) => println!("Family:         {family}"),
        Err(_) => println!("Family:         none"),
    }
    Ok(())
}

fn run_vectors(args: VectorsCommand) -> anyhow::Result<()> {
    let family: Family = args.family.parse()?;
    let selected: Vec<TestCase> = match args.ordinal {
        Some(ordinal) => vec![lookup(family, ordinal)?],
        None => cases(family).collect(),
    };

    let shape = family.shape();
    for case in selected {
        println!("{family} #{}", case.ordinal);
        println!("  input 1  ({} bits): {}", shape.input1_bits, case.input_hex);
        println!("  output 1 ({} bits): {}", shape.output1_bits, case.output_hex);

        if args.bits {
            let input = to_evaluator_order(case.input_hex, shape.input1_bits, "input 1")
                .context("decoding catalog input")?;
            let output = to_evaluator_order(case.output_hex, shape.output1_bits, "output 1")
                .context("decoding catalog output")?;
            println!("  input 1 bits:  {}", bit_string(&input));
            println!("  output 1 bits: {}", bit_string(&output));
        }
    }
    Ok(())
}

/// Bits in index order, bit 0 first.
fn bit_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}
