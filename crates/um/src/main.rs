use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use colored::*;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vm::loader::load_program_file;
use vm::{StreamConsole, VM};

/// Runs a UM-32 program image against the process console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the program image (big-endian 32-bit platters)
    program: PathBuf,

    /// Raise log verbosity (-v debug, -vv trace every instruction)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log filter directives, overrides -v (e.g. "vm=trace")
    #[arg(long, env = "UM_LOG")]
    log: Option<String>,

    /// Print fault reports without color
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let program = load_program_file(&args.program)
        .with_context(|| format!("LoadError: cannot load {}", args.program.display()))?;

    let mut machine = VM::new(program, StreamConsole::stdio());
    machine.cpu.verbose = args.verbose >= 2;

    if let Err(fault) = machine.run() {
        bail!(
            "{} at finger {}: {}",
            fault.kind(),
            machine.cpu.finger,
            fault
        );
    }

    debug!(active_arrays = machine.memory.active_count(), "program halted");
    Ok(())
}

// Logs go to stderr; stdout carries nothing but the program's output bytes.
fn init_logging(args: &Args) {
    let default = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = args
        .log
        .as_deref()
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
