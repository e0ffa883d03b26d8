//! Tick scheduler
//!
//! The first tick fires one full period after [`TickScheduler::start`]. When
//! the receiver falls behind, later ticks are delayed rather than fired in a
//! burst. Every tick is stamped with the run that produced it, and a
//! [`TickReceiver`] only yields ticks of the current run, so nothing arrives
//! after [`TickScheduler::stop`] even if it was already buffered.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::error::{SchedulerError, SchedulerResult};

/// Default tick period.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Ticks buffered before the scheduler waits for the receiver.
pub const TICK_CHANNEL_CAPACITY: usize = 4;

/// Run id stored while the scheduler is stopped.
const STOPPED: u64 = 0;

/// A tick number and the run it belongs to.
type StampedTick = (u64, u64);

/// Emits numbered ticks at a fixed period while running.
///
/// Tick numbers start at 1 and keep counting across stop/start cycles.
/// Dropping the scheduler stops it.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    tick_tx: mpsc::Sender<StampedTick>,
    fired: Arc<AtomicU64>,
    active_run: Arc<AtomicU64>,
    runs: u64,
    task: Option<JoinHandle<()>>,
}

/// Receiving end of a [`TickScheduler`].
///
/// Ticks buffered by a run that has since been stopped are discarded.
#[derive(Debug)]
pub struct TickReceiver {
    rx: mpsc::Receiver<StampedTick>,
    active_run: Arc<AtomicU64>,
}

impl TickReceiver {
    /// Wait for the next tick of the current run. Returns `None` once the
    /// scheduler is dropped.
    ///
    /// Cancel safe: a tick is only taken from the channel when it is returned
    /// or discarded as stale.
    pub async fn recv(&mut self) -> Option<u64> {
        loop {
            let (run, tick) = self.rx.recv().await?;
            if self.is_current(run) {
                return Some(tick);
            }
            trace!(tick, run, "discarding tick from a stopped run");
        }
    }

    /// Take a buffered tick of the current run without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`TryRecvError::Empty`] when no current tick is buffered and
    /// [`TryRecvError::Disconnected`] once the scheduler is dropped.
    pub fn try_recv(&mut self) -> Result<u64, TryRecvError> {
        loop {
            let (run, tick) = self.rx.try_recv()?;
            if self.is_current(run) {
                return Ok(tick);
            }
            trace!(tick, run, "discarding tick from a stopped run");
        }
    }

    fn is_current(&self, run: u64) -> bool {
        run != STOPPED && run == self.active_run.load(Ordering::Acquire)
    }
}

impl TickScheduler {
    /// Create a stopped scheduler and the receiver its ticks arrive on.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidPeriod`] for a zero period.
    pub fn new(period: Duration) -> SchedulerResult<(Self, TickReceiver)> {
        if period.is_zero() {
            return Err(SchedulerError::InvalidPeriod);
        }
        let (tick_tx, rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);
        let active_run = Arc::new(AtomicU64::new(STOPPED));
        let scheduler = Self {
            period,
            tick_tx,
            fired: Arc::new(AtomicU64::new(0)),
            active_run: Arc::clone(&active_run),
            runs: 0,
            task: None,
        };
        Ok((scheduler, TickReceiver { rx, active_run }))
    }

    /// Scheduler with [`DEFAULT_TICK_INTERVAL`].
    ///
    /// # Errors
    ///
    /// Never fails; the default period is non-zero.
    pub fn with_default_interval() -> SchedulerResult<(Self, TickReceiver)> {
        Self::new(DEFAULT_TICK_INTERVAL)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks emitted so far.
    pub fn ticks_fired(&self) -> u64 {
        self.fired.load(Ordering::Relaxed)
    }

    /// Returns true while the tick task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start emitting ticks. Returns `false` if already running.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NoRuntime`] when called outside a tokio
    /// runtime.
    pub fn start(&mut self) -> SchedulerResult<bool> {
        if self.is_running() {
            debug!("scheduler already running");
            return Ok(false);
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return Err(SchedulerError::NoRuntime);
        };

        self.runs += 1;
        let run = self.runs;
        self.active_run.store(run, Ordering::Release);

        let period = self.period;
        let tick_tx = self.tick_tx.clone();
        let fired = Arc::clone(&self.fired);

        self.task = Some(handle.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let tick = fired.fetch_add(1, Ordering::Relaxed) + 1;
                if tick_tx.send((run, tick)).await.is_err() {
                    debug!("tick receiver dropped, scheduler exiting");
                    break;
                }
            }
        }));

        info!(period_ms = period.as_millis(), run, "scheduler started");
        Ok(true)
    }

    /// Stop emitting ticks and discard any still buffered. Returns `false`
    /// if already stopped.
    pub fn stop(&mut self) -> bool {
        self.active_run.store(STOPPED, Ordering::Release);
        match self.task.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                info!(ticks = self.ticks_fired(), "scheduler stopped");
                true
            }
            _ => false,
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.active_run.store(STOPPED, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(
            TickScheduler::new(Duration::ZERO),
            Err(SchedulerError::InvalidPeriod)
        ));
    }

    #[test]
    fn test_start_outside_runtime() -> SchedulerResult<()> {
        let (mut scheduler, _rx) = TickScheduler::new(Duration::from_millis(5))?;
        assert_eq!(scheduler.start(), Err(SchedulerError::NoRuntime));
        assert!(!scheduler.is_running());
        Ok(())
    }

    #[test]
    fn test_stop_when_stopped_is_noop() -> SchedulerResult<()> {
        let (mut scheduler, _rx) = TickScheduler::with_default_interval()?;
        assert_eq!(scheduler.period(), DEFAULT_TICK_INTERVAL);
        assert!(!scheduler.stop());
        assert!(!scheduler.stop());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() -> SchedulerResult<()> {
        let (mut scheduler, mut rx) = TickScheduler::new(Duration::from_secs(5))?;
        let started = Instant::now();
        assert!(scheduler.start()?);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(started.elapsed(), Duration::from_secs(5));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_buffered_tick_discarded_on_stop() -> SchedulerResult<()> {
        let (mut scheduler, mut rx) = TickScheduler::new(Duration::from_secs(1))?;
        scheduler.start()?;
        time::sleep(Duration::from_millis(1_500)).await;
        assert!(scheduler.stop());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        Ok(())
    }
}
