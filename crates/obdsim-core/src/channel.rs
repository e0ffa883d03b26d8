//! Sensor channel definitions: names, value kinds and valid ranges.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Numeric sensor channels in canonical display order.
///
/// The fault code is not a numeric channel; it is carried separately on the
/// snapshot and always rendered last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    EngineRpm,
    CoolantTemp,
    FuelPressure,
    O2SensorVoltage,
    CatalystTemp,
    EgrFlow,
    ShortTermFuelTrim,
    LongTermFuelTrim,
    EvapVaporPressure,
    TransmissionTemp,
    FuelLevel,
    AmbientAirTemp,
    OilPressure,
    BrakePedalPosition,
    SteeringAngle,
    TirePressure,
    AlternatorOutput,
    InjectorPulseWidth,
    KnockSensorVoltage,
    WheelSpeed,
    ClutchPedalPosition,
    ExhaustGasTemp,
}

/// Column name of the fault code field.
pub const FAULT_CODE_COLUMN: &str = "Fault Code";

/// Storage type of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Whole numbers; drift is a uniform integer step.
    Integer,
    /// Real numbers rounded to two decimals; drift is a uniform real step.
    Float,
}

/// Closed interval of valid values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRange {
    pub min: f64,
    pub max: f64,
}

impl ChannelRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the interval.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Channel {
    /// Number of numeric channels.
    pub const COUNT: usize = 22;

    /// All numeric channels in canonical order.
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::EngineRpm,
        Channel::CoolantTemp,
        Channel::FuelPressure,
        Channel::O2SensorVoltage,
        Channel::CatalystTemp,
        Channel::EgrFlow,
        Channel::ShortTermFuelTrim,
        Channel::LongTermFuelTrim,
        Channel::EvapVaporPressure,
        Channel::TransmissionTemp,
        Channel::FuelLevel,
        Channel::AmbientAirTemp,
        Channel::OilPressure,
        Channel::BrakePedalPosition,
        Channel::SteeringAngle,
        Channel::TirePressure,
        Channel::AlternatorOutput,
        Channel::InjectorPulseWidth,
        Channel::KnockSensorVoltage,
        Channel::WheelSpeed,
        Channel::ClutchPedalPosition,
        Channel::ExhaustGasTemp,
    ];

    /// Display and export name, unit included.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::EngineRpm => "Engine RPM",
            Channel::CoolantTemp => "Coolant Temp (°C)",
            Channel::FuelPressure => "Fuel Pressure (kPa)",
            Channel::O2SensorVoltage => "O2 Sensor Voltage (V)",
            Channel::CatalystTemp => "Catalyst Temp (°C)",
            Channel::EgrFlow => "EGR Flow (%)",
            Channel::ShortTermFuelTrim => "Short Term Fuel Trim (%)",
            Channel::LongTermFuelTrim => "Long Term Fuel Trim (%)",
            Channel::EvapVaporPressure => "Evap System Vapor Pressure (kPa)",
            Channel::TransmissionTemp => "Transmission Temp (°C)",
            Channel::FuelLevel => "Fuel Level (%)",
            Channel::AmbientAirTemp => "Ambient Air Temp (°C)",
            Channel::OilPressure => "Oil Pressure (psi)",
            Channel::BrakePedalPosition => "Brake Pedal Position (%)",
            Channel::SteeringAngle => "Steering Angle (°)",
            Channel::TirePressure => "Tire Pressure (psi)",
            Channel::AlternatorOutput => "Alternator Output (V)",
            Channel::InjectorPulseWidth => "Fuel Injector Pulse Width (ms)",
            Channel::KnockSensorVoltage => "Knock Sensor Voltage (V)",
            Channel::WheelSpeed => "Wheel Speed (km/h)",
            Channel::ClutchPedalPosition => "Clutch Pedal Position (%)",
            Channel::ExhaustGasTemp => "Exhaust Gas Temp (°C)",
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::EngineRpm
            | Channel::CoolantTemp
            | Channel::FuelPressure
            | Channel::CatalystTemp
            | Channel::TransmissionTemp
            | Channel::AmbientAirTemp
            | Channel::WheelSpeed
            | Channel::ExhaustGasTemp => ChannelKind::Integer,
            Channel::O2SensorVoltage
            | Channel::EgrFlow
            | Channel::ShortTermFuelTrim
            | Channel::LongTermFuelTrim
            | Channel::EvapVaporPressure
            | Channel::FuelLevel
            | Channel::OilPressure
            | Channel::BrakePedalPosition
            | Channel::SteeringAngle
            | Channel::TirePressure
            | Channel::AlternatorOutput
            | Channel::InjectorPulseWidth
            | Channel::KnockSensorVoltage
            | Channel::ClutchPedalPosition => ChannelKind::Float,
        }
    }

    /// Valid range of the channel.
    ///
    /// Wheel speed is bounded by the target speed domain; the engine pins it to
    /// the target speed (or zero) every tick.
    pub fn range(&self) -> ChannelRange {
        match self {
            Channel::EngineRpm => ChannelRange::new(0.0, 5000.0),
            Channel::CoolantTemp => ChannelRange::new(70.0, 120.0),
            Channel::FuelPressure => ChannelRange::new(0.0, 4000.0),
            Channel::O2SensorVoltage => ChannelRange::new(0.1, 0.9),
            Channel::CatalystTemp => ChannelRange::new(400.0, 800.0),
            Channel::EgrFlow => ChannelRange::new(0.0, 20.0),
            Channel::ShortTermFuelTrim => ChannelRange::new(-10.0, 10.0),
            Channel::LongTermFuelTrim => ChannelRange::new(-5.0, 5.0),
            Channel::EvapVaporPressure => ChannelRange::new(-5.0, 5.0),
            Channel::TransmissionTemp => ChannelRange::new(70.0, 110.0),
            Channel::FuelLevel => ChannelRange::new(0.0, 100.0),
            Channel::AmbientAirTemp => ChannelRange::new(-20.0, 40.0),
            Channel::OilPressure => ChannelRange::new(20.0, 60.0),
            Channel::BrakePedalPosition => ChannelRange::new(0.0, 100.0),
            Channel::SteeringAngle => ChannelRange::new(-180.0, 180.0),
            Channel::TirePressure => ChannelRange::new(28.0, 35.0),
            Channel::AlternatorOutput => ChannelRange::new(12.5, 15.0),
            Channel::InjectorPulseWidth => ChannelRange::new(1.0, 10.0),
            Channel::KnockSensorVoltage => ChannelRange::new(0.0, 5.0),
            Channel::WheelSpeed => ChannelRange::new(0.0, 150.0),
            Channel::ClutchPedalPosition => ChannelRange::new(0.0, 100.0),
            Channel::ExhaustGasTemp => ChannelRange::new(200.0, 1000.0),
        }
    }

    /// Channels forced by the ignition state rather than clamped.
    pub fn is_ignition_gated(&self) -> bool {
        matches!(
            self,
            Channel::EngineRpm | Channel::WheelSpeed | Channel::FuelPressure
        )
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A channel reading with its storage type preserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Integer(i32),
    Float(f64),
}

impl SensorValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            SensorValue::Integer(v) => f64::from(*v),
            SensorValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Integer(v) => write!(f, "{v}"),
            SensorValue::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_canonical_and_unique() {
        let mut sorted = Channel::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), Channel::COUNT);
        assert_eq!(sorted, Channel::ALL.to_vec());
    }

    #[test]
    fn test_ranges_are_ordered() {
        for channel in Channel::ALL {
            let range = channel.range();
            assert!(range.min < range.max, "{channel} range is inverted");
        }
    }

    #[test]
    fn test_ignition_gated_channels() {
        let gated: Vec<Channel> = Channel::ALL
            .iter()
            .copied()
            .filter(Channel::is_ignition_gated)
            .collect();
        assert_eq!(
            gated,
            vec![Channel::EngineRpm, Channel::FuelPressure, Channel::WheelSpeed]
        );
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(SensorValue::Integer(700).to_string(), "700");
        assert_eq!(SensorValue::Float(0.45).to_string(), "0.45");
        assert_eq!(SensorValue::Float(14.0).to_string(), "14.00");
        assert_eq!(SensorValue::Float(-0.5).to_string(), "-0.50");
    }

    #[test]
    fn test_range_clamp() {
        let range = Channel::O2SensorVoltage.range();
        assert!((range.clamp(1.4) - 0.9).abs() < f64::EPSILON);
        assert!((range.clamp(-3.0) - 0.1).abs() < f64::EPSILON);
        assert!(range.contains(0.45));
        assert!(!range.contains(0.95));
    }
}
