//! flightcheck - detect conflicts between straight-line drone flight paths.
//!
//! Usage:
//!   flightcheck scenarios
//!   flightcheck scenario 3 --threshold 2.5
//!   flightcheck detect request.json --json
//!   cat request.json | flightcheck detect

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flightcheck_cli::{catalog, find_scenario, input, Config, DetectionReport};
use flightcheck_core::ConflictDetector;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Spatio-temporal conflict detection for drone flight paths")]
struct Args {
    /// Minimum safe distance (overrides FLIGHTCHECK_THRESHOLD)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Samples across the shared flight horizon (overrides FLIGHTCHECK_SAMPLES)
    #[arg(long, global = true)]
    samples: Option<u32>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in scenarios
    Scenarios,
    /// Run detection on a built-in scenario
    Scenario {
        /// Scenario id
        id: u32,
    },
    /// Run detection on a request body ({"drones": [...]} or a bare array)
    Detect {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flightcheck=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().with_overrides(args.threshold, args.samples);
    let rules = config.rules();
    rules.validate().context("invalid detection settings")?;
    let detector = ConflictDetector::new(rules);

    match args.command {
        Command::Scenarios => {
            for scenario in catalog() {
                let expected = if scenario.has_conflicts {
                    "conflicts expected"
                } else {
                    "conflict-free"
                };
                println!(
                    "{:>2}  {:<30} {} drone(s), {}",
                    scenario.id,
                    scenario.name,
                    scenario.drones.len(),
                    expected
                );
                println!("    {}", scenario.description);
            }
        }
        Command::Scenario { id } => {
            let scenario = find_scenario(id)?;
            tracing::info!(id, name = %scenario.name, "running scenario");

            let report = DetectionReport::build(&scenario.drones, &detector);
            if report.has_conflicts() != scenario.has_conflicts {
                tracing::warn!(
                    expected = scenario.has_conflicts,
                    found = report.has_conflicts(),
                    "scenario result differs from its catalog entry"
                );
            }
            print_report(&report, args.json)?;
        }
        Command::Detect { file } => {
            let records = match &file {
                Some(path) => {
                    let source = path.display().to_string();
                    let reader = File::open(path)
                        .with_context(|| format!("failed to open {source}"))?;
                    input::read_request(reader, &source)?
                }
                None => input::read_request(io::stdin().lock(), "stdin")?,
            };
            tracing::info!(drones = records.len(), "running detection");

            let report = DetectionReport::build(&records, &detector);
            if report.has_conflicts() {
                tracing::warn!("Detected {} drone(s) in conflict", report.conflicts.len());
            }
            print_report(&report, args.json)?;
        }
    }

    Ok(())
}

fn print_report(report: &DetectionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
