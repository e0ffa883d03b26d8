//! Simulator settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use obdsim_core::control::ControlState;
use obdsim_core::faults::{FaultCatalog, FaultCode};
use obdsim_core::scenario::Scenario;
use obdsim_export::ExportFormat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Embedded default configuration document.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("default_config.yaml");

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5000;

/// Top-level simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub scenario: Scenario,
    pub fault: FaultCode,
    pub situation: Option<String>,
    pub controls: ControlsConfig,
    pub export: ExportConfig,
}

/// Initial control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    pub ignition_on: bool,
    pub climate_on: bool,
    pub brake_applied: bool,
    /// Signed so that negative values reach validation.
    pub target_speed: i64,
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            scenario: Scenario::default(),
            fault: FaultCode::NoFault,
            situation: None,
            controls: ControlsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate the embedded default document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded document is malformed.
    pub fn load_default() -> ConfigResult<Self> {
        Self::from_yaml_str(DEFAULT_CONFIG_YAML)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML, unknown fields or
    /// unknown fault / scenario names, and the validation errors of
    /// [`SimConfig::validate`].
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`SimConfig::from_yaml_str`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load `path` if given, the embedded defaults otherwise.
    ///
    /// # Errors
    ///
    /// As [`SimConfig::load`] and [`SimConfig::load_default`].
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        }
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero tick interval and
    /// [`ConfigError::Sim`] for an out-of-range target speed or a situation
    /// missing from the catalog.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "tick_interval_ms",
                "must be greater than zero",
            ));
        }
        self.control_state()?;
        if let Some(situation) = &self.situation {
            FaultCatalog::canonical().fault_for(situation)?;
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Initial control state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Sim`] if the target speed is out of range.
    pub fn control_state(&self) -> ConfigResult<ControlState> {
        let controls = self.controls;
        let mut state = ControlState::new(
            controls.ignition_on,
            controls.climate_on,
            controls.brake_applied,
            0,
        )?;
        state.set_target_speed(controls.target_speed)?;
        Ok(state)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
