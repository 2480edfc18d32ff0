//! Command-line entry point atop the `aig` library.
//!
//! This binary is not part of the library's contract; it exists to give the
//! crate a usable entry point for file-to-file AIGER operations.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use fs_err as fs;
use log::info;

use aig::PoType;

/// Inspect and convert And-Inverter Graph files.
#[derive(Parser)]
#[command(name = "aig", version, about)]
struct CliOptions {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Retype every OUTPUT PO to JUSTICE, group them into one justice
    /// property, and write the result back out.
    Live {
        /// Binary AIGER file to read.
        src: String,
        /// Binary AIGER file to write.
        dst: String,
    },
    /// Read a binary AIGER file and re-emit it unchanged.
    Convert {
        /// Binary AIGER file to read.
        src: String,
        /// Binary AIGER file to write.
        dst: String,
    },
}

fn main() {
    if let Err(error) = aig_main() {
        let _ = write!(io::stderr(), "Error: {}", error);
        std::process::exit(1);
    }
}

/// Initializes the logging framework at a level derived from `-v` count.
///
/// # Errors
///
/// Returns an error if the logging framework has already been initialized.
fn initialize_logging(verbosity: u8) -> io::Result<()> {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter(None, level)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

/// Parses options, dispatches to the requested subcommand, and reports I/O
/// errors to the caller instead of panicking.
///
/// # Errors
///
/// Returns an error if a file cannot be opened, read, or written, or if the
/// input is not well-formed binary AIGER.
fn aig_main() -> io::Result<()> {
    let options = CliOptions::parse();
    initialize_logging(options.verbose)?;

    match options.command {
        Command::Live { src, dst } => run_live(&src, &dst),
        Command::Convert { src, dst } => run_convert(&src, &dst),
    }
}

fn to_io_error(err: aig::AigError) -> io::Error {
    match err {
        aig::AigError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

fn read_aiger(path: &str) -> io::Result<aig::Aig> {
    let mut file = io::BufReader::new(fs::File::open(path)?);
    aig::aiger::read(&mut file).map_err(to_io_error)
}

fn write_aiger(graph: &aig::Aig, path: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    aig::aiger::write(graph, &mut file).map(|_| ()).map_err(to_io_error)
}

fn run_convert(src: &str, dst: &str) -> io::Result<()> {
    info!("convert: {} -> {}", src, dst);
    let graph = read_aiger(src)?;
    write_aiger(&graph, dst)
}

fn run_live(src: &str, dst: &str) -> io::Result<()> {
    info!("live: {} -> {}", src, dst);
    let mut graph = read_aiger(src)?;

    let outputs: Vec<_> = graph.po_ids_of_type(PoType::Output).collect();
    for &po in &outputs {
        graph.set_po_type(po, PoType::Justice);
    }
    if !outputs.is_empty() {
        graph.create_justice(outputs);
    }

    write_aiger(&graph, dst)
}
