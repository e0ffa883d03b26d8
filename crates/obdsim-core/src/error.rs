//! Error types for the simulation core.
//!
//! Every variant is a caller-input error detected before a tick runs. A tick
//! itself cannot fail.

use thiserror::Error;

/// Errors produced by catalog lookups, selection changes and control input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The fault code is not a key of the catalog in use.
    #[error("Unknown fault code: {0}")]
    UnknownFaultCode(String),

    /// No catalog entry lists the situation.
    #[error("Unknown situation: {0}")]
    UnknownSituation(String),

    /// The scenario name is not a key of the scenario catalog.
    #[error("Unknown driving scenario: {0}")]
    UnknownScenario(String),

    /// A control input is outside its allowed domain.
    #[error("Invalid value {value} for control '{control}' (allowed: {min}..={max})")]
    InvalidControlValue {
        /// Control name
        control: &'static str,
        /// Rejected value
        value: i64,
        /// Minimum allowed value
        min: i64,
        /// Maximum allowed value
        max: i64,
    },

    /// A fault catalog built from custom entries violates a catalog invariant.
    #[error("Invalid fault catalog: {0}")]
    InvalidCatalog(String),
}

impl SimError {
    /// Create an unknown fault code error.
    pub fn unknown_fault(code: impl Into<String>) -> Self {
        SimError::UnknownFaultCode(code.into())
    }

    /// Create an unknown situation error.
    pub fn unknown_situation(situation: impl Into<String>) -> Self {
        SimError::UnknownSituation(situation.into())
    }

    /// Create an unknown scenario error.
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        SimError::UnknownScenario(name.into())
    }

    /// Create an invalid catalog error.
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        SimError::InvalidCatalog(reason.into())
    }

    /// Returns true if the error came from a selection (fault, situation or
    /// scenario) rather than from a control value.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            SimError::UnknownFaultCode(_)
                | SimError::UnknownSituation(_)
                | SimError::UnknownScenario(_)
        )
    }
}

/// Result type for simulation core operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fault_display() {
        let err = SimError::unknown_fault("P9999");
        assert_eq!(err.to_string(), "Unknown fault code: P9999");
        assert!(err.is_selection_error());
    }

    #[test]
    fn test_invalid_control_display() {
        let err = SimError::InvalidControlValue {
            control: "target_speed",
            value: 200,
            min: 0,
            max: 150,
        };
        let msg = err.to_string();
        assert!(msg.contains("target_speed"));
        assert!(msg.contains("200"));
        assert!(msg.contains("0..=150"));
        assert!(!err.is_selection_error());
    }

    #[test]
    fn test_error_is_std_error() {
        let err = SimError::unknown_situation("Flat Tyre");
        let _: &dyn std::error::Error = &err;
    }
}
