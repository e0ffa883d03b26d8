//! obdsim - OBD-II telemetry simulator CLI
//!
//! Produces a stream of plausible vehicle sensor readings for a chosen fault
//! code and driving scenario, and exports the session log as CSV or JSON.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use obdsim_config::SimConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{RunArgs, inspect, run};
use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "obdsim")]
#[command(about = "OBD-II telemetry simulator - generate sensor readings for fault codes and driving scenarios")]
#[command(version)]
#[command(long_about = "
obdsim simulates the sensor channels an OBD-II scan tool would read from a
vehicle. Each tick drifts the previous readings, applies the selected fault
code and driving scenario, honors the ignition, climate, brake and target
speed controls, and clamps every channel into its valid range.

Use --json for machine-readable output; `run --json` prints one JSON document
per tick.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file (defaults are built in)
    #[arg(short, long, global = true, env = "OBDSIM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List fault codes and their situations
    Faults,

    /// List the situations of one fault code
    Situations {
        /// Fault code (e.g. P0217) or full label
        fault: String,
    },

    /// Show which fault code a situation belongs to
    Resolve {
        /// Situation description (e.g. "Coolant Leak")
        situation: String,
    },

    /// List driving scenarios
    Scenarios,

    /// Print the baseline snapshot
    Baseline,

    /// Print the effective configuration
    Config,

    /// Run the simulator
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("obdsim={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Faults => inspect::faults(cli.json)?,
        Commands::Situations { fault } => inspect::situations(fault, cli.json)?,
        Commands::Resolve { situation } => inspect::resolve(situation, cli.json)?,
        Commands::Scenarios => inspect::scenarios(cli.json)?,
        Commands::Baseline => inspect::baseline(cli.json)?,
        Commands::Config => inspect::config(&load_config(cli)?, cli.json)?,
        Commands::Run(args) => run::execute(args, &load_config(cli)?, cli.json).await?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> CliResult<SimConfig> {
    Ok(SimConfig::load_or_default(cli.config.as_deref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use obdsim_export::ExportFormat;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_faults_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["obdsim", "faults"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Faults));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "obdsim",
            "baseline",
            "--json",
            "-vv",
            "--config",
            "sim.yaml",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("sim.yaml")));
        Ok(())
    }

    #[test]
    fn parse_situation_arguments() -> TestResult {
        let cli = Cli::try_parse_from(["obdsim", "resolve", "Coolant Leak"])?;
        match &cli.command {
            Commands::Resolve { situation } => assert_eq!(situation, "Coolant Leak"),
            _ => return Err("expected Resolve command".into()),
        }

        let cli = Cli::try_parse_from(["obdsim", "situations", "p0300"])?;
        match &cli.command {
            Commands::Situations { fault } => assert_eq!(fault, "p0300"),
            _ => return Err("expected Situations command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_run_flags() -> TestResult {
        let cli = Cli::try_parse_from([
            "obdsim",
            "run",
            "--seed",
            "7",
            "--interval-ms",
            "500",
            "--scenario",
            "Highway",
            "--fault",
            "P0217",
            "--ignition",
            "--speed",
            "90",
            "-n",
            "10",
            "--export",
            "out.json",
            "--format",
            "json",
        ])?;
        let Commands::Run(args) = &cli.command else {
            return Err("expected Run command".into());
        };
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.interval_ms, Some(500));
        assert_eq!(args.scenario.as_deref(), Some("Highway"));
        assert_eq!(args.fault.as_deref(), Some("P0217"));
        assert!(args.ignition);
        assert!(!args.climate);
        assert_eq!(args.speed, Some(90));
        assert_eq!(args.ticks, Some(10));
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
        assert_eq!(args.format, Some(ExportFormat::Json));
        Ok(())
    }

    #[test]
    fn parse_negative_speed_reaches_validation() -> TestResult {
        let cli = Cli::try_parse_from(["obdsim", "run", "--speed", "-10"])?;
        let Commands::Run(args) = &cli.command else {
            return Err("expected Run command".into());
        };
        assert_eq!(args.speed, Some(-10));
        Ok(())
    }

    #[test]
    fn parse_immediate_requires_ticks() {
        assert!(Cli::try_parse_from(["obdsim", "run", "--immediate"]).is_err());
        assert!(Cli::try_parse_from(["obdsim", "run", "--immediate", "-n", "3"]).is_ok());
        assert!(
            Cli::try_parse_from(["obdsim", "run", "--immediate", "-n", "3", "--interactive"])
                .is_err()
        );
    }

    #[test]
    fn parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["obdsim", "run", "--format", "xlsx"]).is_err());
    }

    #[test]
    fn parse_rejects_missing_subcommand() {
        assert!(Cli::try_parse_from(["obdsim"]).is_err());
    }
}
