//! Update engine
//!
//! One tick turns the previous snapshot into the next one by running a fixed
//! chain of stages over a working copy. Later stages overwrite earlier ones:
//!
//! 1. drift: small random walk on every channel
//! 2. fault: forced values for the active fault code
//! 3. scenario: RPM and wheel speed redrawn from the scenario envelope
//! 4. control: ignition, climate and brake inputs
//! 5. clamp: ranged channels clamped, floats rounded to two decimals
//! 6. fault code stamped onto the snapshot
//!
//! The engine performs no I/O and keeps no state between ticks; given the same
//! random source it always produces the same output.

use crate::channel::{Channel, ChannelKind};
use crate::control::ControlState;
use crate::faults::FaultCode;
use crate::random::RandomSource;
use crate::scenario::Scenario;
use crate::snapshot::SensorSnapshot;

/// Largest per-tick step of integer channels.
pub const INTEGER_DRIFT_STEP: i32 = 10;
/// Largest per-tick step of float channels.
pub const FLOAT_DRIFT_STEP: f64 = 0.5;
/// Largest per-tick step of the ambient air temperature.
pub const AMBIENT_DRIFT_STEP: i32 = 1;

/// RPM window while the ignition is on.
pub const RUNNING_RPM: (i32, i32) = (600, 5000);
/// Fuel pressure window while the ignition is on, in kPa.
pub const RUNNING_FUEL_PRESSURE_KPA: (i32, i32) = (200, 4000);
/// O2 sensor window while the ignition is on, in volts.
pub const RUNNING_O2_VOLTAGE: (f64, f64) = (0.1, 0.9);
/// Alternator window with climate control on, in volts.
pub const CLIMATE_ALTERNATOR_V: (f64, f64) = (13.0, 15.0);
/// Alternator window with climate control off, in volts.
pub const IDLE_ALTERNATOR_V: (f64, f64) = (12.5, 13.5);

/// Brake pedal position when applied.
pub const BRAKE_APPLIED_PCT: f64 = 100.0;

/// Advance the simulation by one tick.
///
/// `previous` is not modified; the returned snapshot replaces it.
///
/// ```
/// use obdsim_core::prelude::*;
///
/// let mut rng = RngSource::seeded(1);
/// let next = tick(
///     &SensorSnapshot::baseline(),
///     ControlState::default(),
///     FaultCode::EngineOverTemperature,
///     Scenario::CityRoad,
///     &mut rng,
/// );
/// assert_eq!(next.fault_code, FaultCode::EngineOverTemperature);
/// assert_eq!(next.engine_rpm, 0);
/// assert!(next.coolant_temp_c >= 110);
/// ```
pub fn tick<R: RandomSource + ?Sized>(
    previous: &SensorSnapshot,
    control: ControlState,
    fault: FaultCode,
    scenario: Scenario,
    rng: &mut R,
) -> SensorSnapshot {
    let mut next = previous.clone();
    next.fault_code = fault;

    drift_stage(&mut next, rng);
    fault_stage(&mut next, fault, rng);
    scenario_stage(&mut next, scenario, rng);
    control_stage(&mut next, control, rng);
    clamp_stage(&mut next);
    next.fault_code = fault;

    next
}

/// Random walk: integer channels move by up to ±10, float channels by up to
/// ±0.5 (the step itself rounded to two decimals). Ambient air temperature
/// moves by up to ±1 and stays within its range.
pub fn drift_stage<R: RandomSource + ?Sized>(snapshot: &mut SensorSnapshot, rng: &mut R) {
    for channel in Channel::ALL {
        let current = snapshot.value(channel);
        let next = match (channel, channel.kind()) {
            (Channel::AmbientAirTemp, _) => {
                let step = rng.int_in(-AMBIENT_DRIFT_STEP, AMBIENT_DRIFT_STEP);
                channel.range().clamp(current + f64::from(step))
            }
            (_, ChannelKind::Integer) => {
                current + f64::from(rng.int_in(-INTEGER_DRIFT_STEP, INTEGER_DRIFT_STEP))
            }
            (_, ChannelKind::Float) => {
                current + round_to_hundredths(rng.float_in(-FLOAT_DRIFT_STEP, FLOAT_DRIFT_STEP))
            }
        };
        snapshot.set(channel, next);
    }
}

/// Forced sensor values for faults with an engine override.
pub fn fault_stage<R: RandomSource + ?Sized>(
    snapshot: &mut SensorSnapshot,
    fault: FaultCode,
    rng: &mut R,
) {
    match fault {
        FaultCode::EngineOverTemperature => snapshot.coolant_temp_c = rng.int_in(110, 120),
        FaultCode::FuelPressureLow => snapshot.fuel_pressure_kpa = rng.int_in(200, 500),
        FaultCode::RandomMisfire => {
            snapshot.engine_rpm = snapshot.engine_rpm.saturating_add(rng.int_in(-100, 100));
        }
        FaultCode::SystemTooLean => snapshot.o2_sensor_voltage = rng.float_in(0.1, 0.3),
        FaultCode::SystemTooRich => snapshot.o2_sensor_voltage = rng.float_in(0.7, 0.9),
        FaultCode::CoolantThermostat
        | FaultCode::FuelPressureSensorHigh
        | FaultCode::O2SensorHeater
        | FaultCode::CatalystEfficiency
        | FaultCode::EgrFlowInsufficient
        | FaultCode::EvapGrossLeak
        | FaultCode::TransmissionControl
        | FaultCode::FuelLevelSensor
        | FaultCode::IntakeAirTempHigh
        | FaultCode::OilPressureSensor
        | FaultCode::BrakePedalSensor
        | FaultCode::SteeringAngleSensor
        | FaultCode::TirePressureSensor
        | FaultCode::AlternatorOutput
        | FaultCode::InjectorPulseWidth
        | FaultCode::KnockSensorVoltage
        | FaultCode::WheelSpeedSensor
        | FaultCode::ClutchPedalSensor
        | FaultCode::ExhaustGasTempSensor
        | FaultCode::NoFault => {}
    }
}

/// Fresh RPM and wheel speed draws from the scenario envelope.
pub fn scenario_stage<R: RandomSource + ?Sized>(
    snapshot: &mut SensorSnapshot,
    scenario: Scenario,
    rng: &mut R,
) {
    let envelope = scenario.envelope();
    snapshot.engine_rpm = rng.int_in(*envelope.rpm.start(), *envelope.rpm.end());
    snapshot.wheel_speed_kmh = rng.int_in(*envelope.speed_kmh.start(), *envelope.speed_kmh.end());
}

/// Apply the operator inputs.
///
/// With the ignition off the engine is stopped: RPM, wheel speed and fuel
/// pressure read zero. With it on, wheel speed follows the target speed.
pub fn control_stage<R: RandomSource + ?Sized>(
    snapshot: &mut SensorSnapshot,
    control: ControlState,
    rng: &mut R,
) {
    if control.ignition_on {
        snapshot.engine_rpm = snapshot.engine_rpm.clamp(RUNNING_RPM.0, RUNNING_RPM.1);
        snapshot.wheel_speed_kmh = i32::from(control.target_speed_kmh());
        snapshot.fuel_pressure_kpa =
            rng.int_in(RUNNING_FUEL_PRESSURE_KPA.0, RUNNING_FUEL_PRESSURE_KPA.1);
        snapshot.o2_sensor_voltage = rng.float_in(RUNNING_O2_VOLTAGE.0, RUNNING_O2_VOLTAGE.1);
    } else {
        snapshot.engine_rpm = 0;
        snapshot.wheel_speed_kmh = 0;
        snapshot.fuel_pressure_kpa = 0;
    }

    snapshot.alternator_output_v = if control.climate_on {
        snapshot
            .alternator_output_v
            .clamp(CLIMATE_ALTERNATOR_V.0, CLIMATE_ALTERNATOR_V.1)
    } else {
        rng.float_in(IDLE_ALTERNATOR_V.0, IDLE_ALTERNATOR_V.1)
    };

    snapshot.brake_pedal_pct = if control.brake_applied {
        BRAKE_APPLIED_PCT
    } else {
        0.0
    };
}

/// Clamp every channel that is not ignition-gated into its range, then round
/// float channels to two decimals. Applying it twice changes nothing.
pub fn clamp_stage(snapshot: &mut SensorSnapshot) {
    for channel in Channel::ALL {
        if channel.is_ignition_gated() {
            continue;
        }
        let clamped = channel.range().clamp(snapshot.value(channel));
        snapshot.set(channel, clamped);
    }
    for channel in Channel::ALL {
        if channel.kind() == ChannelKind::Float {
            let rounded = round_to_hundredths(snapshot.value(channel));
            snapshot.set(channel, rounded);
        }
    }
}

/// Round to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
