//! Manual operator inputs that gate how the snapshot evolves.

use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::faults::FaultCode;
use crate::scenario::Scenario;

/// Highest target speed the operator can request, in km/h.
pub const MAX_TARGET_SPEED_KMH: u16 = 150;

/// Ignition, climate, brake and speed inputs.
///
/// Passed into every tick by value. The engine never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlState {
    pub ignition_on: bool,
    pub climate_on: bool,
    pub brake_applied: bool,
    target_speed_kmh: u16,
}

impl ControlState {
    /// Build a control state, validating the target speed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidControlValue`] if `target_speed_kmh` exceeds
    /// [`MAX_TARGET_SPEED_KMH`].
    pub fn new(
        ignition_on: bool,
        climate_on: bool,
        brake_applied: bool,
        target_speed_kmh: u16,
    ) -> SimResult<Self> {
        let mut state = Self {
            ignition_on,
            climate_on,
            brake_applied,
            target_speed_kmh: 0,
        };
        state.set_target_speed(i64::from(target_speed_kmh))?;
        Ok(state)
    }

    /// Target speed in km/h.
    pub fn target_speed_kmh(&self) -> u16 {
        self.target_speed_kmh
    }

    /// Set the target speed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidControlValue`] if `kmh` is outside
    /// `0..=150`; the current value is kept.
    pub fn set_target_speed(&mut self, kmh: i64) -> SimResult<()> {
        match u16::try_from(kmh) {
            Ok(speed) if speed <= MAX_TARGET_SPEED_KMH => {
                self.target_speed_kmh = speed;
                Ok(())
            }
            _ => Err(SimError::InvalidControlValue {
                control: "target_speed",
                value: kmh,
                min: 0,
                max: i64::from(MAX_TARGET_SPEED_KMH),
            }),
        }
    }

    /// Switch the ignition. Turning it off also returns the speed request to
    /// zero.
    pub fn set_ignition(&mut self, on: bool) {
        self.ignition_on = on;
        if !on {
            self.target_speed_kmh = 0;
        }
    }
}

/// A discrete input from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    SetIgnition(bool),
    ToggleIgnition,
    SetClimate(bool),
    ToggleClimate,
    SetBrake(bool),
    ToggleBrake,
    /// Requested speed in km/h. Kept signed so out-of-range input reaches
    /// validation instead of wrapping.
    SetTargetSpeed(i64),
    SelectFault(FaultCode),
    SelectSituation(String),
    SelectScenario(Scenario),
}

impl ControlEvent {
    /// Apply a pure control event (ignition, climate, brake, speed) to `state`.
    ///
    /// Selection events are not control inputs and leave `state` untouched;
    /// they are handled by [`crate::selection::Selection`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidControlValue`] for an out-of-range speed.
    pub fn apply_to(&self, state: &mut ControlState) -> SimResult<()> {
        match self {
            ControlEvent::SetIgnition(on) => state.set_ignition(*on),
            ControlEvent::ToggleIgnition => state.set_ignition(!state.ignition_on),
            ControlEvent::SetClimate(on) => state.climate_on = *on,
            ControlEvent::ToggleClimate => state.climate_on = !state.climate_on,
            ControlEvent::SetBrake(on) => state.brake_applied = *on,
            ControlEvent::ToggleBrake => state.brake_applied = !state.brake_applied,
            ControlEvent::SetTargetSpeed(kmh) => state.set_target_speed(*kmh)?,
            ControlEvent::SelectFault(_)
            | ControlEvent::SelectSituation(_)
            | ControlEvent::SelectScenario(_) => {}
        }
        Ok(())
    }

    /// Returns true for fault, situation and scenario selections.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            ControlEvent::SelectFault(_)
                | ControlEvent::SelectSituation(_)
                | ControlEvent::SelectScenario(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parked() {
        let state = ControlState::default();
        assert!(!state.ignition_on);
        assert!(!state.climate_on);
        assert!(!state.brake_applied);
        assert_eq!(state.target_speed_kmh(), 0);
    }

    #[test]
    fn test_target_speed_bounds() -> SimResult<()> {
        let mut state = ControlState::default();
        state.set_target_speed(150)?;
        assert_eq!(state.target_speed_kmh(), 150);

        assert!(state.set_target_speed(151).is_err());
        assert!(state.set_target_speed(-1).is_err());
        assert_eq!(state.target_speed_kmh(), 150);
        Ok(())
    }

    #[test]
    fn test_new_rejects_invalid_speed() {
        assert!(matches!(
            ControlState::new(true, false, false, 200),
            Err(SimError::InvalidControlValue { value: 200, .. })
        ));
    }

    #[test]
    fn test_ignition_off_resets_speed() -> SimResult<()> {
        let mut state = ControlState::new(true, false, false, 80)?;
        ControlEvent::ToggleIgnition.apply_to(&mut state)?;
        assert!(!state.ignition_on);
        assert_eq!(state.target_speed_kmh(), 0);
        Ok(())
    }

    #[test]
    fn test_toggles() -> SimResult<()> {
        let mut state = ControlState::default();
        ControlEvent::ToggleClimate.apply_to(&mut state)?;
        ControlEvent::ToggleBrake.apply_to(&mut state)?;
        assert!(state.climate_on);
        assert!(state.brake_applied);
        ControlEvent::ToggleBrake.apply_to(&mut state)?;
        assert!(!state.brake_applied);
        Ok(())
    }

    #[test]
    fn test_selection_events_do_not_touch_controls() -> SimResult<()> {
        let mut state = ControlState::new(true, true, true, 40)?;
        let before = state;
        let event = ControlEvent::SelectScenario(Scenario::Highway);
        assert!(event.is_selection());
        event.apply_to(&mut state)?;
        assert_eq!(state, before);
        Ok(())
    }
}
