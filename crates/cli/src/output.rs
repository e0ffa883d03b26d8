//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Error;
use colored::*;
use obdsim_core::channel::FAULT_CODE_COLUMN;
use obdsim_core::faults::{FaultCatalog, FaultCode};
use obdsim_core::scenario::Scenario;
use obdsim_core::session::LogRecord;
use obdsim_core::snapshot::SensorSnapshot;
use obdsim_export::ExportFormat;
use serde_json::{Value, json};

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_pretty(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Report an error that does not end the session.
pub fn print_error(error: CliError, json: bool) {
    let error = Error::from(error);
    if json {
        print_line(&json!({
            "success": false,
            "error": { "message": error.to_string(), "type": error_type_name(&error) }
        }));
    } else {
        print_error_human(&error);
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error.downcast_ref::<CliError>().map_or("error", CliError::kind)
}

fn print_pretty(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

/// One compact JSON document per line, for streamed output.
fn print_line(value: &Value) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

fn readings_json(snapshot: &SensorSnapshot) -> Value {
    snapshot
        .readings()
        .into_iter()
        .map(|(channel, value)| json!({ "channel": channel, "value": value }))
        .collect()
}

/// Print every catalog fault with its situations
pub fn print_fault_list(catalog: &FaultCatalog, json: bool) {
    if json {
        let faults: Vec<Value> = catalog
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "code": entry.code.dtc(),
                    "label": entry.code.label(),
                    "situations": entry.situations,
                })
            })
            .collect();
        print_pretty(&json!({ "success": true, "faults": faults }));
        return;
    }

    println!("{}", "Fault Codes:".bold());
    for entry in catalog.entries() {
        let label = if entry.code.is_sentinel() {
            entry.code.label().green()
        } else {
            entry.code.label().normal()
        };
        println!("  {} {}", "●".cyan(), label);
        println!("    {}", entry.situations.join(", ").dimmed());
    }
}

/// Print the situations offered for one fault
pub fn print_situations(code: FaultCode, situations: &[String], json: bool) {
    if json {
        print_pretty(&json!({
            "success": true,
            "fault": code.label(),
            "situations": situations,
        }));
        return;
    }

    println!("{} {}", "Situations for".bold(), code.label().bold());
    for situation in situations {
        println!("  • {}", situation);
    }
}

/// Print the fault a situation resolves to
pub fn print_resolution(situation: &str, code: FaultCode, json: bool) {
    if json {
        print_pretty(&json!({
            "success": true,
            "situation": situation,
            "fault": code.label(),
        }));
    } else {
        println!("{} → {}", situation.cyan(), code.label().bold());
    }
}

/// Print the driving scenarios with their envelopes
pub fn print_scenarios(json: bool) {
    if json {
        let scenarios: Vec<Value> = Scenario::ALL
            .iter()
            .map(|scenario| {
                let envelope = scenario.envelope();
                json!({
                    "name": scenario.name(),
                    "rpm": [envelope.rpm.start(), envelope.rpm.end()],
                    "speed_kmh": [envelope.speed_kmh.start(), envelope.speed_kmh.end()],
                })
            })
            .collect();
        print_pretty(&json!({ "success": true, "scenarios": scenarios }));
        return;
    }

    println!("{}", "Driving Scenarios:".bold());
    for scenario in Scenario::ALL {
        let envelope = scenario.envelope();
        println!(
            "  {:<10} RPM {}-{}, speed {}-{} km/h",
            scenario.name().cyan(),
            envelope.rpm.start(),
            envelope.rpm.end(),
            envelope.speed_kmh.start(),
            envelope.speed_kmh.end()
        );
    }
}

/// Print a snapshot as ordered channel/value pairs
pub fn print_snapshot(snapshot: &SensorSnapshot, situation: Option<&str>, json: bool) {
    if json {
        print_pretty(&json!({
            "success": true,
            "situation": situation,
            "readings": readings_json(snapshot),
        }));
        return;
    }

    print_readings_human(snapshot);
    if let Some(situation) = situation {
        println!("  {:<28} {}", "Situation".bold(), situation);
    }
}

fn print_readings_human(snapshot: &SensorSnapshot) {
    for (channel, value) in snapshot.readings() {
        if snapshot.fault_code.is_sentinel() || channel != FAULT_CODE_COLUMN {
            println!("  {:<28} {}", channel, value);
        } else {
            println!("  {:<28} {}", channel, value.red().bold());
        }
    }
}

/// Print one completed tick
pub fn print_tick(tick: u64, record: &LogRecord, json: bool) {
    if json {
        print_line(&json!({
            "tick": tick,
            "fault": record.fault_code.label(),
            "situation": record.situation,
            "readings": readings_json(&record.snapshot),
        }));
        return;
    }

    println!(
        "{} {} {}",
        format!("Tick {}", tick).bold(),
        "·".dimmed(),
        record.situation.dimmed()
    );
    print_readings_human(&record.snapshot);
}

/// Confirm a finished export
pub fn print_exported(path: &Path, format: ExportFormat, records: usize, json: bool) {
    if json {
        print_line(&json!({
            "success": true,
            "exported": path.display().to_string(),
            "format": format,
            "records": records,
        }));
    } else {
        println!(
            "{} {} records to {} ({})",
            "✓".green(),
            records,
            path.display(),
            format
        );
    }
}

/// Short status line for interactive acknowledgements
pub fn print_status(message: &str, json: bool) {
    if json {
        print_line(&json!({ "success": true, "message": message }));
    } else {
        println!("{} {}", "›".cyan(), message);
    }
}

/// Interactive command reference
pub fn print_interactive_help() {
    println!("{}", "Commands:".bold());
    for (usage, summary) in [
        ("ignition on|off|toggle", "switch the ignition"),
        ("climate on|off|toggle", "switch climate control"),
        ("brake on|off|toggle", "apply or release the brake"),
        ("speed N", "set the target speed (0-150 km/h)"),
        ("fault CODE", "select a fault code (e.g. P0217, none)"),
        ("situation TEXT", "select a situation"),
        ("scenario NAME", "select City Road, Highway or Off-Road"),
        ("start | stop", "start or pause the tick scheduler"),
        ("step", "run one tick now"),
        ("show", "print the current readings"),
        ("export PATH", "write the session log (.csv or .json)"),
        ("clear", "drop the session log"),
        ("help", "show this list"),
        ("quit", "leave the session"),
    ] {
        println!("  {:<24} {}", usage.cyan(), summary);
    }
}
