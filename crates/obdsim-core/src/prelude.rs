//! Prelude for the core crate.
//!
//! ```
//! use obdsim_core::prelude::*;
//!
//! let snapshot = SensorSnapshot::baseline();
//! assert_eq!(snapshot.fault_code, FaultCode::NoFault);
//! ```

pub use crate::channel::{Channel, ChannelKind, FAULT_CODE_COLUMN, SensorValue};
pub use crate::control::{ControlEvent, ControlState, MAX_TARGET_SPEED_KMH};
pub use crate::engine::tick;
pub use crate::error::{SimError, SimResult};
pub use crate::faults::{FaultCatalog, FaultCode, FaultEntry, NO_FAULT_LABEL, NORMAL_DRIVING};
pub use crate::random::{RandomSource, RngSource};
pub use crate::scenario::Scenario;
pub use crate::selection::Selection;
pub use crate::session::{LogRecord, SITUATION_COLUMN, SessionLog};
pub use crate::simulator::Simulator;
pub use crate::snapshot::SensorSnapshot;
