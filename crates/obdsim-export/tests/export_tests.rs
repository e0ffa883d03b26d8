//! File-level export tests.

use obdsim_core::prelude::*;
use obdsim_export::csv::csv_header;
use obdsim_export::{ExportError, ExportFormat, ExportOptions, SessionRecording, export};
use obdsim_test_helpers::prelude::*;

fn simulated_log(ticks: usize) -> Result<SessionLog, SimError> {
    let mut sim = Simulator::seeded(2024);
    sim.apply(ControlEvent::SetIgnition(true))?;
    sim.apply(ControlEvent::SetTargetSpeed(72))?;
    sim.apply(ControlEvent::SelectSituation("Coolant Leak".to_string()))?;
    sim.run(ticks);
    Ok(sim.log().clone())
}

#[test]
fn csv_file_has_header_and_one_row_per_tick() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.csv");
    let log = simulated_log(5)?;

    export(&log, &path, ExportFormat::Csv, &ExportOptions::default())?;

    let text = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines.first().copied(), Some(csv_header().as_str()));

    let header: Vec<&str> = must_some(lines.first(), "header").split(',').collect();
    assert_eq!(header, SessionLog::columns());

    for line in lines.iter().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), header.len());
        assert_eq!(fields.get(19).copied(), Some("72"), "wheel speed column");
        assert_eq!(fields.last().copied(), Some("Coolant Leak"));
        assert_eq!(
            fields.iter().rev().nth(1).copied(),
            Some("P0217 - Engine Over Temperature")
        );
    }
    Ok(())
}

#[test]
fn csv_integer_and_float_formatting() -> TestResult {
    let log = simulated_log(3)?;
    let text = obdsim_export::csv::to_csv_string(&log);
    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        for (channel, field) in Channel::ALL.iter().zip(&fields) {
            match channel.kind() {
                ChannelKind::Integer => assert!(!field.contains('.'), "{channel}: {field}"),
                ChannelKind::Float => {
                    let decimals = field.split_once('.').map(|(_, d)| d.len());
                    assert_eq!(decimals, Some(2), "{channel}: {field}");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn json_recording_round_trips() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("session.json");
    let log = simulated_log(8)?;
    let options = ExportOptions {
        tick_interval_ms: 5000,
        seed: Some(2024),
        description: Some("coolant leak drive".to_string()),
    };

    export(&log, &path, ExportFormat::Json, &options)?;
    let recording = SessionRecording::load(&path)?;

    assert_eq!(recording.metadata.record_count, 8);
    assert_eq!(recording.metadata.seed, Some(2024));
    assert_eq!(recording.into_log(), log);
    Ok(())
}

#[test]
fn empty_log_exports_header_only() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.csv");
    export(&SessionLog::new(), &path, ExportFormat::Csv, &ExportOptions::default())?;
    assert_eq!(std::fs::read_to_string(&path)?, format!("{}\r\n", csv_header()));
    Ok(())
}

#[test]
fn failed_export_leaves_log_intact() -> TestResult {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file")?;
    let log = simulated_log(2)?;
    let before = log.clone();

    let result = export(
        &log,
        &blocker.join("session.csv"),
        ExportFormat::Csv,
        &ExportOptions::default(),
    );
    assert!(matches!(result, Err(ExportError::Io(_))));
    assert_eq!(log, before);
    Ok(())
}

#[test]
fn loading_garbage_is_a_json_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.json");
    std::fs::write(&path, b"{ not json")?;
    assert!(matches!(
        SessionRecording::load(&path),
        Err(ExportError::Json(_))
    ));
    Ok(())
}
