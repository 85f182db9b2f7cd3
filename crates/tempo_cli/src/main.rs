//! Tempo CLI — the command-line interface for the Tempo sizing tool.
//!
//! Provides `tempo size` for running the closed-loop gate-sizing
//! controller over a design and `tempo check` for a one-shot setup-timing
//! report without mutating anything.

#![warn(missing_docs)]

mod check;
mod size;

use std::process;

use clap::{Parser, Subcommand};

/// Tempo — operator-level gate sizing for timing closure.
#[derive(Parser, Debug)]
#[command(name = "tempo", version, about = "Tempo gate sizing tool")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the sizing loop over a design.
    Size(SizeArgs),
    /// Report setup violations without mutating the design.
    Check(CheckArgs),
}

/// Arguments for the `tempo size` subcommand.
#[derive(Parser, Debug)]
pub struct SizeArgs {
    /// Path to the design file (netlist + library + constraints JSON).
    pub design: String,

    /// Output directory root (overrides `tempo.toml`).
    #[arg(short, long)]
    pub workdir: Option<String>,

    /// Path to a custom `tempo.toml` configuration file.
    #[arg(long)]
    pub config: Option<String>,

    /// Upper bound on sizing iterations (overrides `tempo.toml`).
    #[arg(long)]
    pub max_iter: Option<u32>,
}

/// Arguments for the `tempo check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the design file (netlist + library + constraints JSON).
    pub design: String,

    /// Maximum number of endpoints to report per timing group.
    #[arg(long, default_value_t = 2000)]
    pub max_paths: usize,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Command::Size(ref args) => size::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
