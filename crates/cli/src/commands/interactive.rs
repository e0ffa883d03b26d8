//! Line commands accepted on stdin during `obdsim run --interactive`

use std::path::PathBuf;

use obdsim_core::control::ControlEvent;
use obdsim_core::faults::FaultCode;
use obdsim_core::scenario::Scenario;

use crate::error::{CliError, CliResult};

/// One parsed stdin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Control or selection input for the simulator.
    Input(ControlEvent),
    Start,
    Stop,
    Step,
    Show,
    Export(PathBuf),
    Clear,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns [`CliError::Validation`] for unknown commands or malformed
/// arguments and [`CliError::Sim`] for unknown fault codes or scenarios.
pub fn parse_command(line: &str) -> CliResult<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
    let verb = verb.to_ascii_lowercase();

    let command = match verb.as_str() {
        "ignition" => SessionCommand::Input(switch(
            &verb,
            rest,
            ControlEvent::SetIgnition,
            ControlEvent::ToggleIgnition,
        )?),
        "climate" => SessionCommand::Input(switch(
            &verb,
            rest,
            ControlEvent::SetClimate,
            ControlEvent::ToggleClimate,
        )?),
        "brake" => SessionCommand::Input(switch(
            &verb,
            rest,
            ControlEvent::SetBrake,
            ControlEvent::ToggleBrake,
        )?),
        "speed" => {
            let kmh = argument(&verb, rest)?.parse::<i64>().map_err(|err| {
                CliError::validation(format!("speed expects a whole number, got '{rest}': {err}"))
            })?;
            SessionCommand::Input(ControlEvent::SetTargetSpeed(kmh))
        }
        "fault" => {
            let code: FaultCode = argument(&verb, rest)?.parse()?;
            SessionCommand::Input(ControlEvent::SelectFault(code))
        }
        "situation" => SessionCommand::Input(ControlEvent::SelectSituation(
            argument(&verb, rest)?.to_string(),
        )),
        "scenario" => {
            let scenario: Scenario = argument(&verb, rest)?.parse()?;
            SessionCommand::Input(ControlEvent::SelectScenario(scenario))
        }
        "export" => SessionCommand::Export(PathBuf::from(argument(&verb, rest)?)),
        "start" => bare(&verb, rest, SessionCommand::Start)?,
        "stop" => bare(&verb, rest, SessionCommand::Stop)?,
        "step" => bare(&verb, rest, SessionCommand::Step)?,
        "show" => bare(&verb, rest, SessionCommand::Show)?,
        "clear" => bare(&verb, rest, SessionCommand::Clear)?,
        "help" | "?" => bare(&verb, rest, SessionCommand::Help)?,
        "quit" | "exit" => bare(&verb, rest, SessionCommand::Quit)?,
        other => {
            return Err(CliError::validation(format!(
                "unknown command '{other}' (type 'help' for a list)"
            )));
        }
    };
    Ok(Some(command))
}

fn argument<'a>(verb: &str, rest: &'a str) -> CliResult<&'a str> {
    if rest.is_empty() {
        Err(CliError::validation(format!("'{verb}' needs an argument")))
    } else {
        Ok(rest)
    }
}

fn bare(verb: &str, rest: &str, command: SessionCommand) -> CliResult<SessionCommand> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CliError::validation(format!(
            "'{verb}' takes no argument, got '{rest}'"
        )))
    }
}

fn switch(
    verb: &str,
    rest: &str,
    set: fn(bool) -> ControlEvent,
    toggle: ControlEvent,
) -> CliResult<ControlEvent> {
    match rest.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(set(true)),
        "off" | "false" | "0" => Ok(set(false)),
        "" | "toggle" => Ok(toggle),
        other => Err(CliError::validation(format!(
            "'{verb}' expects on, off or toggle, got '{other}'"
        ))),
    }
}
