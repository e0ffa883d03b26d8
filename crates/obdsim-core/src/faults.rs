//! Diagnostic trouble codes and the fault catalog.
//!
//! The catalog maps every fault code to an ordered, non-empty list of
//! situation descriptions and supports lookups in both directions. Reverse
//! lookups resolve to the first entry in catalog order that lists the
//! situation.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Fault codes known to the simulator.
///
/// Variants are declared in canonical catalog order. [`FaultCode::NoFault`] is
/// the sentinel for normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FaultCode {
    /// P0217 - Engine Over Temperature
    EngineOverTemperature,
    /// P0128 - Coolant Thermostat Malfunction
    CoolantThermostat,
    /// P0087 - Fuel Rail/System Pressure Too Low
    FuelPressureLow,
    /// P0193 - Fuel Rail Pressure Sensor High Input
    FuelPressureSensorHigh,
    /// P0300 - Random/Multiple Cylinder Misfire Detected
    RandomMisfire,
    /// P0135 - O2 Sensor Heater Circuit Malfunction (Bank 1 Sensor 1)
    O2SensorHeater,
    /// P0420 - Catalyst System Efficiency Below Threshold (Bank 1)
    CatalystEfficiency,
    /// P0401 - Exhaust Gas Recirculation Flow Insufficient Detected
    EgrFlowInsufficient,
    /// P0171 - System Too Lean (Bank 1)
    SystemTooLean,
    /// P0172 - System Too Rich (Bank 1)
    SystemTooRich,
    /// P0455 - Evaporative Emission System Leak Detected (Gross Leak)
    EvapGrossLeak,
    /// P0700 - Transmission Control System Malfunction
    TransmissionControl,
    /// P0460 - Fuel Level Sensor Circuit Malfunction
    FuelLevelSensor,
    /// P0113 - Intake Air Temperature Circuit High Input
    IntakeAirTempHigh,
    /// P0520 - Engine Oil Pressure Sensor/Switch Circuit Malfunction
    OilPressureSensor,
    /// P0570 - Brake Pedal Position Sensor Circuit Malfunction
    BrakePedalSensor,
    /// P1600 - Steering Angle Sensor Circuit Malfunction
    SteeringAngleSensor,
    /// P1601 - Tire Pressure Sensor Circuit Malfunction
    TirePressureSensor,
    /// P1602 - Alternator Output Circuit Malfunction
    AlternatorOutput,
    /// P1603 - Fuel Injector Pulse Width Out of Range
    InjectorPulseWidth,
    /// P1604 - Knock Sensor Voltage Out of Range
    KnockSensorVoltage,
    /// P1605 - Wheel Speed Sensor Circuit Malfunction
    WheelSpeedSensor,
    /// P1606 - Clutch Pedal Position Sensor Circuit Malfunction
    ClutchPedalSensor,
    /// P1607 - Exhaust Gas Temperature Sensor Circuit Malfunction
    ExhaustGasTempSensor,
    /// No Faults Detected
    #[default]
    NoFault,
}

/// Label of the sentinel fault code.
pub const NO_FAULT_LABEL: &str = "No Faults Detected";

/// Sole situation of the sentinel fault code in the canonical catalog.
pub const NORMAL_DRIVING: &str = "Normal Driving";

impl FaultCode {
    /// Number of fault codes, sentinel included.
    pub const COUNT: usize = 25;

    /// All fault codes in canonical catalog order.
    pub const ALL: [FaultCode; Self::COUNT] = [
        FaultCode::EngineOverTemperature,
        FaultCode::CoolantThermostat,
        FaultCode::FuelPressureLow,
        FaultCode::FuelPressureSensorHigh,
        FaultCode::RandomMisfire,
        FaultCode::O2SensorHeater,
        FaultCode::CatalystEfficiency,
        FaultCode::EgrFlowInsufficient,
        FaultCode::SystemTooLean,
        FaultCode::SystemTooRich,
        FaultCode::EvapGrossLeak,
        FaultCode::TransmissionControl,
        FaultCode::FuelLevelSensor,
        FaultCode::IntakeAirTempHigh,
        FaultCode::OilPressureSensor,
        FaultCode::BrakePedalSensor,
        FaultCode::SteeringAngleSensor,
        FaultCode::TirePressureSensor,
        FaultCode::AlternatorOutput,
        FaultCode::InjectorPulseWidth,
        FaultCode::KnockSensorVoltage,
        FaultCode::WheelSpeedSensor,
        FaultCode::ClutchPedalSensor,
        FaultCode::ExhaustGasTempSensor,
        FaultCode::NoFault,
    ];

    /// The SAE diagnostic trouble code, or `None` for the sentinel.
    pub fn dtc(&self) -> Option<&'static str> {
        let dtc = match self {
            FaultCode::EngineOverTemperature => "P0217",
            FaultCode::CoolantThermostat => "P0128",
            FaultCode::FuelPressureLow => "P0087",
            FaultCode::FuelPressureSensorHigh => "P0193",
            FaultCode::RandomMisfire => "P0300",
            FaultCode::O2SensorHeater => "P0135",
            FaultCode::CatalystEfficiency => "P0420",
            FaultCode::EgrFlowInsufficient => "P0401",
            FaultCode::SystemTooLean => "P0171",
            FaultCode::SystemTooRich => "P0172",
            FaultCode::EvapGrossLeak => "P0455",
            FaultCode::TransmissionControl => "P0700",
            FaultCode::FuelLevelSensor => "P0460",
            FaultCode::IntakeAirTempHigh => "P0113",
            FaultCode::OilPressureSensor => "P0520",
            FaultCode::BrakePedalSensor => "P0570",
            FaultCode::SteeringAngleSensor => "P1600",
            FaultCode::TirePressureSensor => "P1601",
            FaultCode::AlternatorOutput => "P1602",
            FaultCode::InjectorPulseWidth => "P1603",
            FaultCode::KnockSensorVoltage => "P1604",
            FaultCode::WheelSpeedSensor => "P1605",
            FaultCode::ClutchPedalSensor => "P1606",
            FaultCode::ExhaustGasTempSensor => "P1607",
            FaultCode::NoFault => return None,
        };
        Some(dtc)
    }

    /// Human-readable description of the fault.
    pub fn description(&self) -> &'static str {
        match self {
            FaultCode::EngineOverTemperature => "Engine Over Temperature",
            FaultCode::CoolantThermostat => "Coolant Thermostat Malfunction",
            FaultCode::FuelPressureLow => "Fuel Rail/System Pressure Too Low",
            FaultCode::FuelPressureSensorHigh => "Fuel Rail Pressure Sensor High Input",
            FaultCode::RandomMisfire => "Random/Multiple Cylinder Misfire Detected",
            FaultCode::O2SensorHeater => "O2 Sensor Heater Circuit Malfunction (Bank 1 Sensor 1)",
            FaultCode::CatalystEfficiency => "Catalyst System Efficiency Below Threshold (Bank 1)",
            FaultCode::EgrFlowInsufficient => {
                "Exhaust Gas Recirculation Flow Insufficient Detected"
            }
            FaultCode::SystemTooLean => "System Too Lean (Bank 1)",
            FaultCode::SystemTooRich => "System Too Rich (Bank 1)",
            FaultCode::EvapGrossLeak => "Evaporative Emission System Leak Detected (Gross Leak)",
            FaultCode::TransmissionControl => "Transmission Control System Malfunction",
            FaultCode::FuelLevelSensor => "Fuel Level Sensor Circuit Malfunction",
            FaultCode::IntakeAirTempHigh => "Intake Air Temperature Circuit High Input",
            FaultCode::OilPressureSensor => "Engine Oil Pressure Sensor/Switch Circuit Malfunction",
            FaultCode::BrakePedalSensor => "Brake Pedal Position Sensor Circuit Malfunction",
            FaultCode::SteeringAngleSensor => "Steering Angle Sensor Circuit Malfunction",
            FaultCode::TirePressureSensor => "Tire Pressure Sensor Circuit Malfunction",
            FaultCode::AlternatorOutput => "Alternator Output Circuit Malfunction",
            FaultCode::InjectorPulseWidth => "Fuel Injector Pulse Width Out of Range",
            FaultCode::KnockSensorVoltage => "Knock Sensor Voltage Out of Range",
            FaultCode::WheelSpeedSensor => "Wheel Speed Sensor Circuit Malfunction",
            FaultCode::ClutchPedalSensor => "Clutch Pedal Position Sensor Circuit Malfunction",
            FaultCode::ExhaustGasTempSensor => "Exhaust Gas Temperature Sensor Circuit Malfunction",
            FaultCode::NoFault => NO_FAULT_LABEL,
        }
    }

    /// Full display label, e.g. `P0217 - Engine Over Temperature`.
    pub fn label(&self) -> String {
        match self.dtc() {
            Some(dtc) => format!("{dtc} - {}", self.description()),
            None => self.description().to_string(),
        }
    }

    /// Situations listed for this code in the canonical catalog.
    pub fn canonical_situations(&self) -> &'static [&'static str] {
        match self {
            FaultCode::EngineOverTemperature => {
                &["Engine Overheating", "Coolant Leak", "Radiator Fan Failure"]
            }
            FaultCode::CoolantThermostat => &["Thermostat Stuck Open", "Engine Overheating"],
            FaultCode::FuelPressureLow => &["Low Fuel Pressure", "Fuel Pump Failure"],
            FaultCode::FuelPressureSensorHigh => &["Fuel Pressure Sensor Fault"],
            FaultCode::RandomMisfire => &["Random/Multiple Misfire", "Ignition Coil Failure"],
            FaultCode::O2SensorHeater => &["O2 Sensor Malfunction"],
            FaultCode::CatalystEfficiency => &["Catalyst Efficiency Below Threshold"],
            FaultCode::EgrFlowInsufficient => &["EGR Flow Insufficient"],
            FaultCode::SystemTooLean => &["System Too Lean"],
            FaultCode::SystemTooRich => &["System Too Rich"],
            FaultCode::EvapGrossLeak => &["Evaporative Emission System Leak"],
            FaultCode::TransmissionControl => &["Transmission Overheating"],
            FaultCode::FuelLevelSensor => &["Low Fuel Level"],
            FaultCode::IntakeAirTempHigh => &["Ambient Air Temperature Sensor Fault"],
            FaultCode::OilPressureSensor => &["Oil Pressure Out of Range"],
            FaultCode::BrakePedalSensor => &["Brake Pedal Position Out of Range"],
            FaultCode::SteeringAngleSensor => &["Steering Angle Out of Range"],
            FaultCode::TirePressureSensor => &["Tire Pressure Out of Range"],
            FaultCode::AlternatorOutput => &["Alternator Output Out of Range"],
            FaultCode::InjectorPulseWidth => &["Fuel Injector Pulse Width Out of Range"],
            FaultCode::KnockSensorVoltage => &["Knock Sensor Voltage Out of Range"],
            FaultCode::WheelSpeedSensor => &["Wheel Speed Out of Range"],
            FaultCode::ClutchPedalSensor => &["Clutch Pedal Position Out of Range"],
            FaultCode::ExhaustGasTempSensor => &["Exhaust Gas Temperature Out of Range"],
            FaultCode::NoFault => &[NORMAL_DRIVING],
        }
    }

    /// Returns true if the engine forces sensor values for this fault.
    pub fn has_engine_override(&self) -> bool {
        matches!(
            self,
            FaultCode::EngineOverTemperature
                | FaultCode::FuelPressureLow
                | FaultCode::RandomMisfire
                | FaultCode::SystemTooLean
                | FaultCode::SystemTooRich
        )
    }

    /// Returns true for the "no fault" sentinel.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, FaultCode::NoFault)
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dtc() {
            Some(dtc) => write!(f, "{dtc} - {}", self.description()),
            None => f.write_str(self.description()),
        }
    }
}

impl FromStr for FaultCode {
    type Err = SimError;

    /// Accepts a bare DTC (`p0217`), a full label, or the sentinel label
    /// (`No Faults Detected`, `none`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case(NO_FAULT_LABEL) || text.eq_ignore_ascii_case("none") {
            return Ok(FaultCode::NoFault);
        }

        let dtc = text.split_once(" - ").map_or(text, |(dtc, _)| dtc).trim();
        FaultCode::ALL
            .iter()
            .copied()
            .find(|code| code.dtc().is_some_and(|d| d.eq_ignore_ascii_case(dtc)))
            .ok_or_else(|| SimError::unknown_fault(text))
    }
}

impl TryFrom<String> for FaultCode {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FaultCode> for String {
    fn from(code: FaultCode) -> Self {
        code.label()
    }
}

/// One catalog row: a fault code and its ordered situations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultEntry {
    /// Fault code (catalog key).
    pub code: FaultCode,
    /// Situation descriptions in display order. Never empty.
    pub situations: Vec<String>,
}

impl FaultEntry {
    /// Create an entry from a code and its situations.
    pub fn new<I, S>(code: FaultCode, situations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            situations: situations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mapping from fault code to situation descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultCatalog {
    entries: Vec<FaultEntry>,
}

impl Default for FaultCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FaultCatalog {
    /// The canonical catalog: every [`FaultCode`] with its standard situations.
    pub fn canonical() -> Self {
        let entries = FaultCode::ALL
            .iter()
            .map(|code| FaultEntry::new(*code, code.canonical_situations().iter().copied()))
            .collect();
        Self { entries }
    }

    /// Build a catalog from custom entries.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidCatalog`] if the entry list is empty, an entry
    /// has no situations, a code appears twice, or the sentinel is missing.
    pub fn new(entries: Vec<FaultEntry>) -> SimResult<Self> {
        if entries.is_empty() {
            return Err(SimError::invalid_catalog("catalog has no entries"));
        }

        for (i, entry) in entries.iter().enumerate() {
            if entry.situations.is_empty() {
                return Err(SimError::invalid_catalog(format!(
                    "{} has no situations",
                    entry.code
                )));
            }
            if entries.iter().skip(i + 1).any(|e| e.code == entry.code) {
                return Err(SimError::invalid_catalog(format!(
                    "{} is listed more than once",
                    entry.code
                )));
            }
        }

        if !entries.iter().any(|e| e.code.is_sentinel()) {
            return Err(SimError::invalid_catalog(format!(
                "sentinel '{NO_FAULT_LABEL}' is missing"
            )));
        }

        Ok(Self { entries })
    }

    /// Catalog rows in canonical order.
    pub fn entries(&self) -> &[FaultEntry] {
        &self.entries
    }

    /// Catalog keys in canonical order.
    pub fn codes(&self) -> impl Iterator<Item = FaultCode> + '_ {
        self.entries.iter().map(|e| e.code)
    }

    /// Returns true if `code` is a catalog key.
    pub fn contains(&self, code: FaultCode) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries. Never true for a validated
    /// catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Situations listed for `code`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if `code` is not a catalog key.
    pub fn situations_for(&self, code: FaultCode) -> SimResult<&[String]> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.situations.as_slice())
            .ok_or_else(|| SimError::unknown_fault(code.label()))
    }

    /// The first situation listed for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if `code` is not a catalog key.
    pub fn default_situation(&self, code: FaultCode) -> SimResult<&str> {
        self.situations_for(code)?
            .first()
            .map(String::as_str)
            .ok_or_else(|| SimError::unknown_fault(code.label()))
    }

    /// Resolve the fault code owning `situation`.
    ///
    /// Entries are scanned in catalog order and the first entry listing the
    /// situation wins.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownSituation`] if no entry lists it.
    pub fn fault_for(&self, situation: &str) -> SimResult<FaultCode> {
        self.entries
            .iter()
            .find(|e| e.situations.iter().any(|s| s == situation))
            .map(|e| e.code)
            .ok_or_else(|| SimError::unknown_situation(situation))
    }

    /// Parse a fault code from text and check that it is a catalog key.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if the text names no known code
    /// or the code is absent from this catalog.
    pub fn parse_code(&self, text: &str) -> SimResult<FaultCode> {
        let code: FaultCode = text.parse()?;
        if self.contains(code) {
            Ok(code)
        } else {
            Err(SimError::unknown_fault(text.trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_catalog_covers_every_code() {
        let catalog = FaultCatalog::canonical();
        assert_eq!(catalog.len(), FaultCode::COUNT);
        for code in FaultCode::ALL {
            assert!(catalog.contains(code));
        }
    }

    #[test]
    fn test_sentinel_is_last_and_normal() -> SimResult<()> {
        let catalog = FaultCatalog::canonical();
        assert_eq!(catalog.codes().last(), Some(FaultCode::NoFault));
        assert_eq!(catalog.situations_for(FaultCode::NoFault)?, ["Normal Driving"]);
        Ok(())
    }

    #[test]
    fn test_shared_situation_resolves_to_first_entry() -> SimResult<()> {
        let catalog = FaultCatalog::canonical();
        // "Engine Overheating" is listed under P0217 and P0128.
        assert_eq!(
            catalog.fault_for("Engine Overheating")?,
            FaultCode::EngineOverTemperature
        );
        assert_eq!(
            catalog.fault_for("Thermostat Stuck Open")?,
            FaultCode::CoolantThermostat
        );
        Ok(())
    }

    #[test]
    fn test_unknown_situation() {
        let catalog = FaultCatalog::canonical();
        assert_eq!(
            catalog.fault_for("Flat Tyre"),
            Err(SimError::unknown_situation("Flat Tyre"))
        );
    }

    #[test]
    fn test_situations_for_missing_code() {
        let catalog = match FaultCatalog::new(vec![FaultEntry::new(
            FaultCode::NoFault,
            ["Normal Driving"],
        )]) {
            Ok(c) => c,
            Err(e) => panic!("catalog should be valid: {e}"),
        };
        assert!(matches!(
            catalog.situations_for(FaultCode::RandomMisfire),
            Err(SimError::UnknownFaultCode(_))
        ));
    }

    #[test]
    fn test_parse_dtc_and_labels() -> SimResult<()> {
        assert_eq!("P0217".parse::<FaultCode>()?, FaultCode::EngineOverTemperature);
        assert_eq!("p0300".parse::<FaultCode>()?, FaultCode::RandomMisfire);
        assert_eq!(
            "P0171 - System Too Lean (Bank 1)".parse::<FaultCode>()?,
            FaultCode::SystemTooLean
        );
        assert_eq!("No Faults Detected".parse::<FaultCode>()?, FaultCode::NoFault);
        assert_eq!("none".parse::<FaultCode>()?, FaultCode::NoFault);
        assert!("P9999".parse::<FaultCode>().is_err());
        Ok(())
    }

    #[test]
    fn test_label_round_trips_through_parse() -> SimResult<()> {
        for code in FaultCode::ALL {
            assert_eq!(code.label().parse::<FaultCode>()?, code);
            assert_eq!(code.to_string(), code.label());
        }
        Ok(())
    }

    #[test]
    fn test_catalog_validation() {
        assert!(FaultCatalog::new(Vec::new()).is_err());
        assert!(
            FaultCatalog::new(vec![FaultEntry::new(
                FaultCode::NoFault,
                Vec::<String>::new()
            )])
            .is_err()
        );
        assert!(
            FaultCatalog::new(vec![FaultEntry::new(
                FaultCode::RandomMisfire,
                ["Ignition Coil Failure"]
            )])
            .is_err()
        );
        assert!(
            FaultCatalog::new(vec![
                FaultEntry::new(FaultCode::NoFault, ["Normal Driving"]),
                FaultEntry::new(FaultCode::NoFault, ["Idle"]),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_override_faults() {
        let overriding: Vec<FaultCode> = FaultCode::ALL
            .iter()
            .copied()
            .filter(FaultCode::has_engine_override)
            .collect();
        assert_eq!(
            overriding,
            vec![
                FaultCode::EngineOverTemperature,
                FaultCode::FuelPressureLow,
                FaultCode::RandomMisfire,
                FaultCode::SystemTooLean,
                FaultCode::SystemTooRich,
            ]
        );
    }
}
