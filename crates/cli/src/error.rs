//! Error types for the obdsim CLI

use obdsim_config::ConfigError;
use obdsim_core::SimError;
use obdsim_export::ExportError;
use obdsim_scheduler::SchedulerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::Validation(message.into())
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Export(_) => 2,
            CliError::Config(_) => 3,
            CliError::Validation(_) | CliError::Sim(_) | CliError::Scheduler(_) => 4,
            CliError::Io(_) | CliError::Json(_) => 1,
        }
    }

    /// Short machine-readable name used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Validation(_) => "validation",
            CliError::Sim(SimError::UnknownFaultCode(_)) => "unknown_fault_code",
            CliError::Sim(SimError::UnknownSituation(_)) => "unknown_situation",
            CliError::Sim(SimError::UnknownScenario(_)) => "unknown_scenario",
            CliError::Sim(SimError::InvalidControlValue { .. }) => "invalid_control_value",
            CliError::Sim(SimError::InvalidCatalog(_)) => "invalid_catalog",
            CliError::Config(_) => "config",
            CliError::Export(_) => "export",
            CliError::Scheduler(_) => "scheduler",
            CliError::Io(_) => "io",
            CliError::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code(), 4);
        assert_eq!(
            CliError::from(SimError::unknown_situation("Flat Tyre")).exit_code(),
            4
        );
        assert_eq!(
            CliError::from(ConfigError::invalid("tick_interval_ms", "zero")).exit_code(),
            3
        );
        assert_eq!(
            CliError::from(ExportError::UnknownFormat("xlsx".into())).exit_code(),
            2
        );
        assert_eq!(CliError::from(std::io::Error::other("boom")).exit_code(), 1);
    }

    #[test]
    fn test_sim_errors_keep_their_message() {
        let err = CliError::from(SimError::unknown_fault("P9999"));
        assert_eq!(err.to_string(), "Unknown fault code: P9999");
        assert_eq!(err.kind(), "unknown_fault_code");
    }
}
