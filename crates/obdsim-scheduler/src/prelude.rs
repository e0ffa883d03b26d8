//! Prelude for the scheduler crate.

pub use crate::error::{SchedulerError, SchedulerResult};
pub use crate::scheduler::{DEFAULT_TICK_INTERVAL, TickReceiver, TickScheduler};
