//! Tally CLI
//!
//! Runs a Tally program: either from a file named on the command line, or
//! from the first line of stdin with the rest of the stream available to
//! the program's read instruction.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use tally_vm::{Machine, load_program};

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tally virtual machine - run chained-digit stack programs", long_about = None)]
struct Cli {
    /// Program file to run; reads the first line of stdin when omitted
    program: Option<PathBuf>,

    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging: RUST_LOG wins, --trace raises the machine to trace level
    let default_directive = if cli.trace { "tally_vm=trace" } else { "tally_vm=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    if cli.program.is_none() && io::stdin().is_terminal() {
        eprintln!("tally: reading program from stdin (one line, then program input)");
    }

    let mut stdin = io::stdin().lock();
    let program = match load_program(cli.program.as_deref(), &mut stdin) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("tally: cannot load program: {err}");
            process::exit(1);
        }
    };

    let mut machine = Machine::new(program.as_bytes(), stdin, io::stdout().lock());
    if let Err(err) = machine.run() {
        eprintln!("tally: {err}");
        process::exit(1);
    }
}
