//! `cnf-solver [--profile <path|->] [--seed <u64>] [-v|-vv] <input|->`
//!
//! Reads a DIMACS CNF instance, runs the solver, and prints `sat` or
//! `unsat`. Grounded on `jix-varisat-cli` and
//! `tiptenbrink-munchkin/src/runner.rs`'s clap + anyhow CLI shape.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use cnf_solver::dimacs::Dimacs;
use cnf_solver::{SolveResult, Solver};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cnf-solver", about = "A CDCL SAT solver for DIMACS CNF formulas")]
struct Args {
    /// Input file, or `-` for stdin.
    input: PathBuf,

    /// Write solver statistics to this path, or `-` for stdout.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Seed the branching polarity RNG for deterministic reruns.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Raise log verbosity: `-v` for info, `-vv` for debug.
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = read_input(&args.input)?;
    let dimacs = Dimacs::parse(&input).context("failed to parse DIMACS input")?;

    let mut solver = Solver::new(args.seed);
    for clause in &dimacs.clauses {
        solver.add_clause(clause);
    }

    let start = Instant::now();
    let result = solver.solve();
    let elapsed = start.elapsed();

    if let Some(profile_path) = &args.profile {
        write_profile(profile_path, &solver.stats(), elapsed)?;
    }

    match result {
        SolveResult::Sat(_) => {
            println!("sat");
            Ok(())
        }
        SolveResult::Unsat => {
            println!("unsat");
            Ok(())
        }
    }
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn write_profile(path: &PathBuf, stats: &cnf_solver::Stats, elapsed: std::time::Duration) -> Result<()> {
    let report = format!("{stats}\nwall time: {:.3}s\n", elapsed.as_secs_f64());

    if path.as_os_str() == "-" {
        io::stdout()
            .write_all(report.as_bytes())
            .context("failed to write profile to stdout")
    } else {
        fs::write(path, report).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_target(false)
        .init();
}
