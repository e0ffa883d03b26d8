//! Sensor-state simulation engine for the OBD-II telemetry simulator
//!
//! This crate produces a stream of plausible vehicle sensor snapshots. Each
//! tick drifts the previous snapshot, applies the effects of the selected
//! diagnostic trouble code and driving scenario, honors the operator's
//! controls and clamps everything into each channel's valid range.
//!
//! # Overview
//!
//! - [`faults`]: fault codes and the fault/situation catalog
//! - [`scenario`]: driving scenarios and their RPM / speed envelopes
//! - [`channel`] and [`snapshot`]: sensor channels and their values
//! - [`control`]: operator inputs
//! - [`engine`]: the pure per-tick update
//! - [`selection`]: fault / situation / scenario synchronization
//! - [`session`]: the per-tick session log
//! - [`simulator`]: a stateful driver tying the pieces together
//!
//! # Example
//!
//! ```
//! use obdsim_core::prelude::*;
//!
//! # fn main() -> SimResult<()> {
//! let mut sim = Simulator::seeded(42);
//! sim.apply(ControlEvent::SetIgnition(true))?;
//! sim.apply(ControlEvent::SetTargetSpeed(50))?;
//! sim.apply(ControlEvent::SelectFault(FaultCode::SystemTooLean))?;
//!
//! let record = sim.step();
//! assert_eq!(record.snapshot.wheel_speed_kmh, 50);
//! assert_eq!(record.fault_code, FaultCode::SystemTooLean);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(rust_2018_idioms)]

pub mod channel;
pub mod control;
pub mod engine;
pub mod error;
pub mod faults;
pub mod prelude;
pub mod random;
pub mod scenario;
pub mod selection;
pub mod session;
pub mod simulator;
pub mod snapshot;

pub use channel::{Channel, ChannelKind, ChannelRange, SensorValue};
pub use control::{ControlEvent, ControlState, MAX_TARGET_SPEED_KMH};
pub use engine::tick;
pub use error::{SimError, SimResult};
pub use faults::{FaultCatalog, FaultCode, FaultEntry};
pub use random::{RandomSource, RngSource};
pub use scenario::{Scenario, ScenarioEnvelope};
pub use selection::Selection;
pub use session::{LogRecord, SessionLog};
pub use simulator::Simulator;
pub use snapshot::SensorSnapshot;
