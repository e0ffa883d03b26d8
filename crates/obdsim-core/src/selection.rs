//! Current fault, situation and scenario, kept consistent with the catalog.

use serde::Serialize;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::faults::{FaultCatalog, FaultCode, NORMAL_DRIVING};
use crate::scenario::Scenario;

/// The operator's fault, situation and scenario choice.
///
/// The situation always belongs to the selected fault's list. Every
/// `select_*` method either succeeds completely or leaves the selection
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    fault: FaultCode,
    situation: String,
    scenario: Scenario,
}

impl Default for Selection {
    /// Normal driving in the city, valid for the canonical catalog.
    fn default() -> Self {
        Self {
            fault: FaultCode::NoFault,
            situation: NORMAL_DRIVING.to_string(),
            scenario: Scenario::default(),
        }
    }
}

impl Selection {
    /// Start on the sentinel fault with its first situation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if the catalog lacks the
    /// sentinel.
    pub fn new(catalog: &FaultCatalog) -> SimResult<Self> {
        Ok(Self {
            fault: FaultCode::NoFault,
            situation: catalog.default_situation(FaultCode::NoFault)?.to_string(),
            scenario: Scenario::default(),
        })
    }

    pub fn fault(&self) -> FaultCode {
        self.fault
    }

    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Situations offered for the current fault.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if `catalog` is not the one the
    /// selection was built against.
    pub fn situations<'a>(&self, catalog: &'a FaultCatalog) -> SimResult<&'a [String]> {
        catalog.situations_for(self.fault)
    }

    /// Select a fault. The situation resets to the fault's first entry; the
    /// new situation list is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownFaultCode`] if `code` is not in `catalog`.
    pub fn select_fault<'a>(
        &mut self,
        catalog: &'a FaultCatalog,
        code: FaultCode,
    ) -> SimResult<&'a [String]> {
        let situations = catalog.situations_for(code)?;
        let first = situations
            .first()
            .ok_or_else(|| SimError::unknown_fault(code.label()))?;

        self.fault = code;
        self.situation.clone_from(first);
        debug!(fault = %code, situation = %self.situation, "fault selected");
        Ok(situations)
    }

    /// Select a situation and re-resolve the owning fault.
    ///
    /// When the situation is listed under a different fault than the current
    /// one (the first owner in catalog order), the selection switches to that
    /// fault and keeps the chosen situation. Returns the resulting fault.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownSituation`] if no catalog entry lists it.
    pub fn select_situation(
        &mut self,
        catalog: &FaultCatalog,
        situation: &str,
    ) -> SimResult<FaultCode> {
        let owner = catalog.fault_for(situation)?;
        if owner != self.fault {
            debug!(from = %self.fault, to = %owner, "situation belongs to another fault");
            self.fault = owner;
        }
        situation.clone_into(&mut self.situation);
        debug!(fault = %self.fault, situation, "situation selected");
        Ok(owner)
    }

    /// Select a driving scenario.
    pub fn select_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
        debug!(%scenario, "scenario selected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faults::FaultEntry;

    #[test]
    fn test_default_matches_canonical_new() -> SimResult<()> {
        let catalog = FaultCatalog::canonical();
        assert_eq!(Selection::new(&catalog)?, Selection::default());
        Ok(())
    }

    #[test]
    fn test_select_fault_resets_situation() -> SimResult<()> {
        let catalog = FaultCatalog::canonical();
        let mut selection = Selection::default();
        let situations = selection.select_fault(&catalog, FaultCode::SystemTooLean)?;
        assert_eq!(situations.first().map(String::as_str), Some(selection.situation()));
        assert_eq!(selection.fault(), FaultCode::SystemTooLean);
        Ok(())
    }

    #[test]
    fn test_select_situation_switches_fault() -> SimResult<()> {
        let catalog = FaultCatalog::canonical();
        let mut selection = Selection::default();
        let owner = selection.select_situation(&catalog, "Engine Overheating")?;
        assert_eq!(owner, FaultCode::EngineOverTemperature);
        assert_eq!(selection.fault(), owner);
        assert_eq!(selection.situation(), "Engine Overheating");
        assert!(
            selection
                .situations(&catalog)?
                .iter()
                .any(|s| s == "Engine Overheating")
        );
        Ok(())
    }

    #[test]
    fn test_failed_selection_leaves_state() -> SimResult<()> {
        let catalog = FaultCatalog::new(vec![
            FaultEntry::new(FaultCode::RandomMisfire, ["Rough Idle"]),
            FaultEntry::new(FaultCode::NoFault, ["Normal Driving"]),
        ])?;
        let mut selection = Selection::new(&catalog)?;
        selection.select_scenario(Scenario::OffRoad);
        let before = selection.clone();

        assert!(matches!(
            selection.select_fault(&catalog, FaultCode::SystemTooRich),
            Err(SimError::UnknownFaultCode(_))
        ));
        assert!(matches!(
            selection.select_situation(&catalog, "Flat Tyre"),
            Err(SimError::UnknownSituation(_))
        ));
        assert_eq!(selection, before);
        Ok(())
    }

    #[test]
    fn test_select_scenario() {
        let mut selection = Selection::default();
        selection.select_scenario(Scenario::Highway);
        assert_eq!(selection.scenario(), Scenario::Highway);
        assert_eq!(selection.fault(), FaultCode::NoFault);
    }
}
