//! Simulator driver
//!
//! Owns everything a front end needs between ticks: the catalog, the control
//! inputs, the selection, the current snapshot, the session log and the random
//! source. Inputs go through [`Simulator::apply`]; [`Simulator::step`] runs one
//! tick and logs it.

use tracing::{debug, trace, warn};

use crate::control::{ControlEvent, ControlState};
use crate::engine;
use crate::error::SimResult;
use crate::faults::FaultCatalog;
use crate::random::{RandomSource, RngSource};
use crate::selection::Selection;
use crate::session::{LogRecord, SessionLog};
use crate::snapshot::SensorSnapshot;

/// Stateful wrapper around the update engine.
#[derive(Debug, Clone)]
pub struct Simulator<R = RngSource> {
    catalog: FaultCatalog,
    control: ControlState,
    selection: Selection,
    snapshot: SensorSnapshot,
    log: SessionLog,
    rng: R,
    ticks: u64,
}

impl Simulator<RngSource> {
    /// Canonical catalog with a seeded random source.
    pub fn seeded(seed: u64) -> Self {
        Self::canonical(RngSource::seeded(seed))
    }

    /// Canonical catalog with an OS-seeded random source.
    pub fn from_entropy() -> Self {
        Self::canonical(RngSource::from_entropy())
    }
}

impl<R: RandomSource> Simulator<R> {
    /// Canonical catalog, baseline snapshot, parked controls.
    pub fn canonical(rng: R) -> Self {
        Self {
            catalog: FaultCatalog::canonical(),
            control: ControlState::default(),
            selection: Selection::default(),
            snapshot: SensorSnapshot::baseline(),
            log: SessionLog::new(),
            rng,
            ticks: 0,
        }
    }

    /// Custom catalog, baseline snapshot, parked controls.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::UnknownFaultCode`] if the catalog has no
    /// sentinel entry.
    pub fn new(catalog: FaultCatalog, rng: R) -> SimResult<Self> {
        let selection = Selection::new(&catalog)?;
        Ok(Self {
            catalog,
            control: ControlState::default(),
            selection,
            snapshot: SensorSnapshot::baseline(),
            log: SessionLog::new(),
            rng,
            ticks: 0,
        })
    }

    pub fn catalog(&self) -> &FaultCatalog {
        &self.catalog
    }

    pub fn control(&self) -> ControlState {
        self.control
    }

    /// Replace all control inputs at once.
    pub fn set_control(&mut self, control: ControlState) {
        debug!(?control, "controls replaced");
        self.control = control;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The most recent snapshot (the baseline before the first tick).
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Drop all logged records. The snapshot is kept.
    pub fn clear_log(&mut self) {
        debug!(records = self.log.len(), "session log cleared");
        self.log.clear();
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Situations offered for the selected fault.
    ///
    /// # Errors
    ///
    /// Never fails for a selection built against this simulator's catalog.
    pub fn situations(&self) -> SimResult<&[String]> {
        self.selection.situations(&self.catalog)
    }

    /// Apply one input. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::SimError`] describing the rejected input.
    pub fn apply(&mut self, event: ControlEvent) -> SimResult<()> {
        let result = match &event {
            ControlEvent::SelectFault(code) => self
                .selection
                .select_fault(&self.catalog, *code)
                .map(|_| ()),
            ControlEvent::SelectSituation(situation) => self
                .selection
                .select_situation(&self.catalog, situation)
                .map(|_| ()),
            ControlEvent::SelectScenario(scenario) => {
                self.selection.select_scenario(*scenario);
                Ok(())
            }
            _ => event.apply_to(&mut self.control),
        };

        match &result {
            Ok(()) => debug!(?event, control = ?self.control, "input applied"),
            Err(err) => warn!(?event, error = %err, "input rejected"),
        }
        result
    }

    /// Run one tick, log it and return the new record.
    pub fn step(&mut self) -> LogRecord {
        self.snapshot = engine::tick(
            &self.snapshot,
            self.control,
            self.selection.fault(),
            self.selection.scenario(),
            &mut self.rng,
        );
        self.ticks += 1;

        let record = LogRecord::new(self.snapshot.clone(), self.selection.situation());
        self.log.push(record.clone());
        trace!(
            tick = self.ticks,
            fault = %record.fault_code,
            rpm = record.snapshot.engine_rpm,
            speed = record.snapshot.wheel_speed_kmh,
            "tick"
        );
        record
    }

    /// Run `count` ticks and return their records.
    pub fn run(&mut self, count: usize) -> Vec<LogRecord> {
        (0..count).map(|_| self.step()).collect()
    }
}
