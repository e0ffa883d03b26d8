//! Read-only catalog and configuration commands

use obdsim_config::SimConfig;
use obdsim_core::faults::FaultCatalog;
use obdsim_core::snapshot::SensorSnapshot;

use crate::error::CliResult;
use crate::output;

pub fn faults(json: bool) -> CliResult<()> {
    output::print_fault_list(&FaultCatalog::canonical(), json);
    Ok(())
}

/// List the situations of one fault, given as a DTC or full label.
pub fn situations(fault: &str, json: bool) -> CliResult<()> {
    let catalog = FaultCatalog::canonical();
    let code = catalog.parse_code(fault)?;
    output::print_situations(code, catalog.situations_for(code)?, json);
    Ok(())
}

/// Show which fault a situation belongs to (first match in catalog order).
pub fn resolve(situation: &str, json: bool) -> CliResult<()> {
    let code = FaultCatalog::canonical().fault_for(situation)?;
    output::print_resolution(situation, code, json);
    Ok(())
}

pub fn scenarios(json: bool) -> CliResult<()> {
    output::print_scenarios(json);
    Ok(())
}

pub fn baseline(json: bool) -> CliResult<()> {
    output::print_snapshot(&SensorSnapshot::baseline(), None, json);
    Ok(())
}

/// Print the effective configuration.
pub fn config(config: &SimConfig, json: bool) -> CliResult<()> {
    if json {
        let text = serde_json::to_string_pretty(&serde_json::json!({
            "success": true,
            "config": config,
        }))?;
        println!("{text}");
    } else {
        print!("{}", config.to_yaml_string()?);
    }
    Ok(())
}
