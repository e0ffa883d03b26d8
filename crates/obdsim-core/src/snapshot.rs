//! Sensor snapshot: the complete set of channel values at one instant.

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, FAULT_CODE_COLUMN, SensorValue};
use crate::faults::FaultCode;

/// Channel values at one simulated instant.
///
/// Integer channels are stored as `i32`, float channels as `f64`. Fields can
/// be read directly; generic access goes through [`SensorSnapshot::get`] and
/// [`SensorSnapshot::set`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub engine_rpm: i32,
    pub coolant_temp_c: i32,
    pub fuel_pressure_kpa: i32,
    pub o2_sensor_voltage: f64,
    pub catalyst_temp_c: i32,
    pub egr_flow_pct: f64,
    pub short_term_fuel_trim_pct: f64,
    pub long_term_fuel_trim_pct: f64,
    pub evap_vapor_pressure_kpa: f64,
    pub transmission_temp_c: i32,
    pub fuel_level_pct: f64,
    pub ambient_air_temp_c: i32,
    pub oil_pressure_psi: f64,
    pub brake_pedal_pct: f64,
    pub steering_angle_deg: f64,
    pub tire_pressure_psi: f64,
    pub alternator_output_v: f64,
    pub injector_pulse_width_ms: f64,
    pub knock_sensor_voltage: f64,
    pub wheel_speed_kmh: i32,
    pub clutch_pedal_pct: f64,
    pub exhaust_gas_temp_c: i32,
    pub fault_code: FaultCode,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::baseline()
    }
}

impl SensorSnapshot {
    /// Healthy idle values used at session start. Not randomized.
    pub fn baseline() -> Self {
        Self {
            engine_rpm: 700,
            coolant_temp_c: 90,
            fuel_pressure_kpa: 3000,
            o2_sensor_voltage: 0.45,
            catalyst_temp_c: 500,
            egr_flow_pct: 10.0,
            short_term_fuel_trim_pct: 0.0,
            long_term_fuel_trim_pct: 0.0,
            evap_vapor_pressure_kpa: -0.5,
            transmission_temp_c: 85,
            fuel_level_pct: 80.0,
            ambient_air_temp_c: 25,
            oil_pressure_psi: 40.0,
            brake_pedal_pct: 0.0,
            steering_angle_deg: 0.0,
            tire_pressure_psi: 32.0,
            alternator_output_v: 14.0,
            injector_pulse_width_ms: 3.0,
            knock_sensor_voltage: 0.2,
            wheel_speed_kmh: 0,
            clutch_pedal_pct: 0.0,
            exhaust_gas_temp_c: 400,
            fault_code: FaultCode::NoFault,
        }
    }

    /// Read a channel.
    pub fn get(&self, channel: Channel) -> SensorValue {
        match channel {
            Channel::EngineRpm => SensorValue::Integer(self.engine_rpm),
            Channel::CoolantTemp => SensorValue::Integer(self.coolant_temp_c),
            Channel::FuelPressure => SensorValue::Integer(self.fuel_pressure_kpa),
            Channel::O2SensorVoltage => SensorValue::Float(self.o2_sensor_voltage),
            Channel::CatalystTemp => SensorValue::Integer(self.catalyst_temp_c),
            Channel::EgrFlow => SensorValue::Float(self.egr_flow_pct),
            Channel::ShortTermFuelTrim => SensorValue::Float(self.short_term_fuel_trim_pct),
            Channel::LongTermFuelTrim => SensorValue::Float(self.long_term_fuel_trim_pct),
            Channel::EvapVaporPressure => SensorValue::Float(self.evap_vapor_pressure_kpa),
            Channel::TransmissionTemp => SensorValue::Integer(self.transmission_temp_c),
            Channel::FuelLevel => SensorValue::Float(self.fuel_level_pct),
            Channel::AmbientAirTemp => SensorValue::Integer(self.ambient_air_temp_c),
            Channel::OilPressure => SensorValue::Float(self.oil_pressure_psi),
            Channel::BrakePedalPosition => SensorValue::Float(self.brake_pedal_pct),
            Channel::SteeringAngle => SensorValue::Float(self.steering_angle_deg),
            Channel::TirePressure => SensorValue::Float(self.tire_pressure_psi),
            Channel::AlternatorOutput => SensorValue::Float(self.alternator_output_v),
            Channel::InjectorPulseWidth => SensorValue::Float(self.injector_pulse_width_ms),
            Channel::KnockSensorVoltage => SensorValue::Float(self.knock_sensor_voltage),
            Channel::WheelSpeed => SensorValue::Integer(self.wheel_speed_kmh),
            Channel::ClutchPedalPosition => SensorValue::Float(self.clutch_pedal_pct),
            Channel::ExhaustGasTemp => SensorValue::Integer(self.exhaust_gas_temp_c),
        }
    }

    /// Read a channel as `f64`.
    pub fn value(&self, channel: Channel) -> f64 {
        self.get(channel).as_f64()
    }

    /// Write a channel. Integer channels round `value` to the nearest whole
    /// number.
    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::EngineRpm => self.engine_rpm = round_to_i32(value),
            Channel::CoolantTemp => self.coolant_temp_c = round_to_i32(value),
            Channel::FuelPressure => self.fuel_pressure_kpa = round_to_i32(value),
            Channel::O2SensorVoltage => self.o2_sensor_voltage = value,
            Channel::CatalystTemp => self.catalyst_temp_c = round_to_i32(value),
            Channel::EgrFlow => self.egr_flow_pct = value,
            Channel::ShortTermFuelTrim => self.short_term_fuel_trim_pct = value,
            Channel::LongTermFuelTrim => self.long_term_fuel_trim_pct = value,
            Channel::EvapVaporPressure => self.evap_vapor_pressure_kpa = value,
            Channel::TransmissionTemp => self.transmission_temp_c = round_to_i32(value),
            Channel::FuelLevel => self.fuel_level_pct = value,
            Channel::AmbientAirTemp => self.ambient_air_temp_c = round_to_i32(value),
            Channel::OilPressure => self.oil_pressure_psi = value,
            Channel::BrakePedalPosition => self.brake_pedal_pct = value,
            Channel::SteeringAngle => self.steering_angle_deg = value,
            Channel::TirePressure => self.tire_pressure_psi = value,
            Channel::AlternatorOutput => self.alternator_output_v = value,
            Channel::InjectorPulseWidth => self.injector_pulse_width_ms = value,
            Channel::KnockSensorVoltage => self.knock_sensor_voltage = value,
            Channel::WheelSpeed => self.wheel_speed_kmh = round_to_i32(value),
            Channel::ClutchPedalPosition => self.clutch_pedal_pct = value,
            Channel::ExhaustGasTemp => self.exhaust_gas_temp_c = round_to_i32(value),
        }
    }

    /// Ordered `(name, formatted value)` pairs for display, fault code last.
    pub fn readings(&self) -> Vec<(&'static str, String)> {
        Channel::ALL
            .iter()
            .map(|channel| (channel.name(), self.get(*channel).to_string()))
            .chain(core::iter::once((FAULT_CODE_COLUMN, self.fault_code.label())))
            .collect()
    }

    /// Snapshot column names in canonical order, fault code last.
    pub fn column_names() -> Vec<&'static str> {
        Channel::ALL
            .iter()
            .map(Channel::name)
            .chain(core::iter::once(FAULT_CODE_COLUMN))
            .collect()
    }

    /// Channels whose value lies outside the declared range.
    pub fn out_of_range(&self) -> Vec<Channel> {
        Channel::ALL
            .iter()
            .copied()
            .filter(|channel| !channel.range().contains(self.value(*channel)))
            .collect()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "channel values are clamped to small ranges before storage"
)]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_baseline_values() {
        let s = SensorSnapshot::baseline();
        assert_eq!(s.engine_rpm, 700);
        assert_eq!(s.coolant_temp_c, 90);
        assert_eq!(s.fuel_pressure_kpa, 3000);
        assert!(approx(s.o2_sensor_voltage, 0.45));
        assert_eq!(s.catalyst_temp_c, 500);
        assert!(approx(s.evap_vapor_pressure_kpa, -0.5));
        assert_eq!(s.wheel_speed_kmh, 0);
        assert_eq!(s.exhaust_gas_temp_c, 400);
        assert_eq!(s.fault_code, FaultCode::NoFault);
        assert!(s.out_of_range().is_empty());
    }

    #[test]
    fn test_set_then_get_every_channel() {
        let mut s = SensorSnapshot::baseline();
        for channel in Channel::ALL {
            let target = channel.range().min;
            s.set(channel, target);
            assert!(approx(s.value(channel), target), "{channel}");
        }
    }

    #[test]
    fn test_set_rounds_integer_channels() {
        let mut s = SensorSnapshot::baseline();
        s.set(Channel::CoolantTemp, 101.6);
        assert_eq!(s.coolant_temp_c, 102);
        s.set(Channel::O2SensorVoltage, 0.333);
        assert!(approx(s.o2_sensor_voltage, 0.333));
    }

    #[test]
    fn test_readings_order_and_format() {
        let readings = SensorSnapshot::baseline().readings();
        assert_eq!(readings.len(), Channel::COUNT + 1);
        assert_eq!(readings.first(), Some(&("Engine RPM", "700".to_string())));
        assert_eq!(
            readings.last(),
            Some(&("Fault Code", "No Faults Detected".to_string()))
        );
        let names: Vec<&str> = readings.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, SensorSnapshot::column_names());
    }

    #[test]
    fn test_out_of_range_reports_channel() {
        let mut s = SensorSnapshot::baseline();
        s.coolant_temp_c = 150;
        assert_eq!(s.out_of_range(), vec![Channel::CoolantTemp]);
    }
}
