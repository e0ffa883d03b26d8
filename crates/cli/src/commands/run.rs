//! `obdsim run`: drive the simulator from the tick scheduler

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use obdsim_config::SimConfig;
use obdsim_core::control::{ControlEvent, ControlState};
use obdsim_core::faults::FaultCode;
use obdsim_core::scenario::Scenario;
use obdsim_core::simulator::Simulator;
use obdsim_export::{ExportFormat, ExportOptions};
use obdsim_scheduler::TickScheduler;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};

use crate::commands::interactive::{SessionCommand, parse_command};
use crate::error::{CliError, CliResult};
use crate::output;

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Seed for the random source (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tick period in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Driving scenario (City Road, Highway, Off-Road)
    #[arg(long)]
    pub scenario: Option<String>,

    /// Fault code to inject (e.g. P0217, none)
    #[arg(long)]
    pub fault: Option<String>,

    /// Situation; selects the fault that lists it
    #[arg(long)]
    pub situation: Option<String>,

    /// Start with the ignition on
    #[arg(long)]
    pub ignition: bool,

    /// Start with climate control on
    #[arg(long)]
    pub climate: bool,

    /// Start with the brake applied
    #[arg(long)]
    pub brake: bool,

    /// Target speed in km/h (0-150)
    #[arg(long, value_name = "KMH", allow_hyphen_values = true)]
    pub speed: Option<i64>,

    /// Stop after this many ticks
    #[arg(short = 'n', long)]
    pub ticks: Option<u64>,

    /// Export the session log here when the run ends
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Export format (defaults to the file extension, then the config)
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Free-form description stored in JSON recordings
    #[arg(long)]
    pub description: Option<String>,

    /// Read control commands from stdin while running
    #[arg(short, long)]
    pub interactive: bool,

    /// Run the ticks back to back instead of on the scheduler
    #[arg(long, requires = "ticks", conflicts_with = "interactive")]
    pub immediate: bool,
}

/// Run parameters after layering command-line flags over the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub interval_ms: u64,
    pub seed: Option<u64>,
    pub scenario: Scenario,
    pub fault: FaultCode,
    pub situation: Option<String>,
    pub control: ControlState,
    pub ticks: Option<u64>,
    pub export: Option<(PathBuf, ExportFormat)>,
    pub default_format: ExportFormat,
    pub description: Option<String>,
}

impl RunPlan {
    /// Resolve flags against `config`. A `--fault` flag discards the
    /// configured situation.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Validation`] for a zero interval and
    /// [`CliError::Sim`] for unknown names or an out-of-range speed.
    pub fn resolve(args: &RunArgs, config: &SimConfig) -> CliResult<Self> {
        let interval_ms = args.interval_ms.unwrap_or(config.tick_interval_ms);
        if interval_ms == 0 {
            return Err(CliError::validation(
                "--interval-ms must be greater than zero",
            ));
        }

        let scenario = match &args.scenario {
            Some(name) => name.parse()?,
            None => config.scenario,
        };
        let fault = match &args.fault {
            Some(code) => code.parse()?,
            None => config.fault,
        };
        let situation = match (&args.situation, &args.fault) {
            (Some(situation), _) => Some(situation.clone()),
            (None, Some(_)) => None,
            (None, None) => config.situation.clone(),
        };

        let mut control = config.control_state()?;
        for (flag, event) in [
            (args.ignition, ControlEvent::SetIgnition(true)),
            (args.climate, ControlEvent::SetClimate(true)),
            (args.brake, ControlEvent::SetBrake(true)),
        ] {
            if flag {
                event.apply_to(&mut control)?;
            }
        }
        if let Some(kmh) = args.speed {
            control.set_target_speed(kmh)?;
        }

        let default_format = args.format.unwrap_or(config.export.format);
        let export = args
            .export
            .clone()
            .or_else(|| config.export.path.clone())
            .map(|path| {
                let format = args
                    .format
                    .or_else(|| ExportFormat::from_path(&path))
                    .unwrap_or(config.export.format);
                (path, format)
            });

        Ok(Self {
            interval_ms,
            seed: args.seed.or(config.seed),
            scenario,
            fault,
            situation,
            control,
            ticks: args.ticks,
            export,
            default_format,
            description: args.description.clone(),
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Simulator with this plan's selection and controls applied.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Sim`] for a situation missing from the catalog.
    pub fn build_simulator(&self) -> CliResult<Simulator> {
        let mut sim = match self.seed {
            Some(seed) => Simulator::seeded(seed),
            None => Simulator::from_entropy(),
        };
        sim.apply(ControlEvent::SelectScenario(self.scenario))?;
        sim.apply(ControlEvent::SelectFault(self.fault))?;
        if let Some(situation) = &self.situation {
            sim.apply(ControlEvent::SelectSituation(situation.clone()))?;
        }
        sim.set_control(self.control);
        Ok(sim)
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            tick_interval_ms: self.interval_ms,
            seed: self.seed,
            description: self.description.clone(),
        }
    }

    fn limit_reached(&self, sim: &Simulator) -> bool {
        self.ticks.is_some_and(|limit| sim.ticks() >= limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn execute(args: &RunArgs, config: &SimConfig, json: bool) -> CliResult<()> {
    let plan = RunPlan::resolve(args, config)?;
    let mut sim = plan.build_simulator()?;
    info!(
        scenario = %plan.scenario,
        fault = %sim.selection().fault(),
        seed = ?plan.seed,
        interval_ms = plan.interval_ms,
        "simulation starting"
    );

    if args.immediate {
        while !plan.limit_reached(&sim) {
            tick_once(&mut sim, json);
        }
    } else {
        run_scheduled(&plan, &mut sim, args.interactive, json).await?;
    }

    info!(ticks = sim.ticks(), records = sim.log().len(), "simulation finished");
    if let Some((path, format)) = &plan.export {
        export_log(&sim, path, *format, &plan.export_options(), json)?;
    }
    Ok(())
}

async fn run_scheduled(
    plan: &RunPlan,
    sim: &mut Simulator,
    interactive: bool,
    json: bool,
) -> CliResult<()> {
    if plan.limit_reached(sim) {
        debug!(ticks = sim.ticks(), "tick limit already reached");
        return Ok(());
    }

    let (mut scheduler, mut ticks) = TickScheduler::new(plan.interval())?;
    scheduler.start()?;

    let mut stdin = interactive.then(|| BufReader::new(tokio::io::stdin()).lines());
    if interactive {
        output::print_status("session running, type 'help' for commands", json);
    }

    loop {
        tokio::select! {
            Some(_) = ticks.recv() => {
                tick_once(sim, json);
                if plan.limit_reached(sim) {
                    break;
                }
            }
            line = next_line(&mut stdin) => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                if handle_line(&line, plan, sim, &mut scheduler, json)? == Flow::Quit
                    || plan.limit_reached(sim)
                {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    scheduler.stop();
    Ok(())
}

async fn next_line(lines: &mut Option<Lines<BufReader<Stdin>>>) -> std::io::Result<Option<String>> {
    match lines {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

fn handle_line(
    line: &str,
    plan: &RunPlan,
    sim: &mut Simulator,
    scheduler: &mut TickScheduler,
    json: bool,
) -> CliResult<Flow> {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(Flow::Continue),
        Err(err) => {
            output::print_error(err, json);
            return Ok(Flow::Continue);
        }
    };

    match command {
        SessionCommand::Input(event) => match sim.apply(event) {
            Ok(()) => output::print_status(&describe(sim), json),
            Err(err) => output::print_error(err.into(), json),
        },
        SessionCommand::Start => {
            let message = if scheduler.start()? {
                "scheduler started"
            } else {
                "scheduler already running"
            };
            output::print_status(message, json);
        }
        SessionCommand::Stop => {
            let message = if scheduler.stop() {
                "scheduler stopped"
            } else {
                "scheduler already stopped"
            };
            output::print_status(message, json);
        }
        SessionCommand::Step => tick_once(sim, json),
        SessionCommand::Show => {
            output::print_snapshot(sim.snapshot(), Some(sim.selection().situation()), json);
        }
        SessionCommand::Export(path) => {
            let format = ExportFormat::from_path(&path).unwrap_or(plan.default_format);
            if let Err(err) = export_log(sim, &path, format, &plan.export_options(), json) {
                output::print_error(err, json);
            }
        }
        SessionCommand::Clear => {
            sim.clear_log();
            output::print_status("session log cleared", json);
        }
        SessionCommand::Help => output::print_interactive_help(),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn tick_once(sim: &mut Simulator, json: bool) {
    let record = sim.step();
    output::print_tick(sim.ticks(), &record, json);
}

fn describe(sim: &Simulator) -> String {
    let control = sim.control();
    let selection = sim.selection();
    format!(
        "ignition {}, climate {}, brake {}, target {} km/h | {} | {} | {}",
        on_off(control.ignition_on),
        on_off(control.climate_on),
        on_off(control.brake_applied),
        control.target_speed_kmh(),
        selection.scenario(),
        selection.fault(),
        selection.situation()
    )
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn export_log(
    sim: &Simulator,
    path: &Path,
    format: ExportFormat,
    options: &ExportOptions,
    json: bool,
) -> CliResult<()> {
    obdsim_export::export(sim.log(), path, format, options)?;
    output::print_exported(path, format, sim.log().len(), json);
    Ok(())
}
