//! YAML configuration for the OBD-II telemetry simulator.
//!
//! Settings come from an optional YAML file layered over the embedded
//! defaults in [`DEFAULT_CONFIG_YAML`]; command-line flags override both.
//!
//! ```
//! use obdsim_config::SimConfig;
//!
//! let config = SimConfig::from_yaml_str("tick_interval_ms: 1000\nseed: 7\n")?;
//! assert_eq!(config.tick_interval().as_secs(), 1);
//! assert_eq!(config.seed, Some(7));
//! # Ok::<(), obdsim_config::ConfigError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]

pub mod config;
pub mod error;

pub use config::{
    ControlsConfig, DEFAULT_CONFIG_YAML, DEFAULT_TICK_INTERVAL_MS, ExportConfig, SimConfig,
};
pub use error::{ConfigError, ConfigResult};
