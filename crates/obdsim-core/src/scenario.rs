//! Driving scenarios and their RPM / speed envelopes.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Named driving context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scenario {
    /// Urban driving with frequent stops.
    #[default]
    CityRoad,
    /// Sustained high-speed cruising.
    Highway,
    /// Low-speed, high-load terrain.
    OffRoad,
}

/// Closed RPM and speed intervals for a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEnvelope {
    /// Engine RPM interval.
    pub rpm: RangeInclusive<i32>,
    /// Wheel speed interval in km/h.
    pub speed_kmh: RangeInclusive<i32>,
}

impl Scenario {
    /// All scenarios in catalog order.
    pub const ALL: [Scenario; 3] = [Scenario::CityRoad, Scenario::Highway, Scenario::OffRoad];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CityRoad => "City Road",
            Scenario::Highway => "Highway",
            Scenario::OffRoad => "Off-Road",
        }
    }

    /// RPM and speed envelope of the scenario.
    pub fn envelope(&self) -> ScenarioEnvelope {
        match self {
            Scenario::CityRoad => ScenarioEnvelope {
                rpm: 600..=3000,
                speed_kmh: 0..=60,
            },
            Scenario::Highway => ScenarioEnvelope {
                rpm: 2000..=4000,
                speed_kmh: 60..=120,
            },
            Scenario::OffRoad => ScenarioEnvelope {
                rpm: 1000..=3500,
                speed_kmh: 0..=40,
            },
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    /// Matches names case-insensitively, ignoring spaces, dashes and
    /// underscores (`city-road`, `OffRoad`, `off road`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| normalize(scenario.name()) == wanted)
            .ok_or_else(|| SimError::unknown_scenario(s.trim()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl TryFrom<String> for Scenario {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scenario> for String {
    fn from(scenario: Scenario) -> Self {
        scenario.name().to_string()
    }
}
