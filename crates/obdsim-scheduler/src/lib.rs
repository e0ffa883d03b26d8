//! Periodic tick scheduler for the OBD-II telemetry simulator.
//!
//! A [`TickScheduler`] runs a tokio task that emits a tick number to its
//! [`TickReceiver`] once per period. The receiver side owns the simulator and runs one tick per
//! message, so ticks never overlap and the session log has a single writer.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use obdsim_scheduler::TickScheduler;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), obdsim_scheduler::SchedulerError> {
//! let (mut scheduler, mut ticks) = TickScheduler::new(Duration::from_millis(10))?;
//! scheduler.start()?;
//! assert_eq!(ticks.recv().await, Some(1));
//! scheduler.stop();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(unused_must_use)]

pub mod error;
pub mod prelude;
pub mod scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use scheduler::{DEFAULT_TICK_INTERVAL, TICK_CHANNEL_CAPACITY, TickReceiver, TickScheduler};
