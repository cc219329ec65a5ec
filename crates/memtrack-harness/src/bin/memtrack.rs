//! CLI entrypoint for the memtrack demo harness.

use clap::{Parser, Subcommand};
use serde::Serialize;

use memtrack_core::{LogicalAllocator, ReportSummary, TrackedAllocator, TrackerConfig};
use memtrack_harness::{ScenarioOutcome, run_demo, run_stress};

/// Demo and stress tooling for the memtrack allocation tracker.
#[derive(Debug, Parser)]
#[command(name = "memtrack")]
#[command(about = "Demo and stress driver for the memtrack allocation tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the classic demo scenario against the real system allocator.
    Demo {
        /// Emit the machine-readable JSON summary instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Run a deterministic pseudo-random trace against the logical allocator.
    Stress {
        /// Number of operations to drive through the tracker.
        #[arg(long, default_value_t = 10_000)]
        ops: u64,
        /// Trace seed; the same seed always produces the same report.
        #[arg(long, default_value_t = 0xA5A5_5A5A)]
        seed: u64,
        /// Emit the machine-readable JSON summary instead of the text report.
        #[arg(long)]
        json: bool,
    },
}

/// JSONL-friendly envelope around the summary.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    scenario: &'a str,
    summary: &'a ReportSummary,
}

fn print_outcome(
    scenario: &str,
    outcome: &ScenarioOutcome,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let envelope = JsonOutput {
            scenario,
            summary: &outcome.summary,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print!("{}", outcome.report);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo { json } => {
            let outcome = run_demo(memtrack_sys::global_tracker())?;
            print_outcome("demo", &outcome, json)?;
        }
        Command::Stress { ops, seed, json } => {
            let tracker =
                TrackedAllocator::with_config(LogicalAllocator::new(), TrackerConfig::from_env());
            let outcome = run_stress(&tracker, ops, seed)?;
            print_outcome("stress", &outcome, json)?;
        }
    }
    Ok(())
}
