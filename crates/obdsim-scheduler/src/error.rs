//! Error types for the scheduler crate.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The tick period is zero.
    #[error("tick period must be greater than zero")]
    InvalidPeriod,

    /// `start` was called outside a tokio runtime.
    #[error("scheduler must be started from within a tokio runtime")]
    NoRuntime,
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
