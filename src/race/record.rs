//! Persistent race history.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::combat::TurnReport;
use crate::core::{Result, Seat, SeatMap};
use crate::driver::Vitals;

use super::config::RaceConfig;
use super::outcome::RaceOutcome;

/// One round as it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub attacker: Seat,
    pub report: TurnReport,
    /// Both drivers' vitals after the turn.
    pub vitals: SeatMap<Vitals>,
}

/// A race snapshot: who drove, under which rules, every round so far and
/// the outcome once there is one.
///
/// Rounds live in an `im::Vector`, so snapshotting a running race shares
/// structure with it instead of copying the history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub drivers: SeatMap<String>,
    pub config: RaceConfig,
    pub rounds: Vector<RoundRecord>,
    pub outcome: Option<RaceOutcome>,
}

impl RaceRecord {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Total damage dealt to each seat's tires.
    #[must_use]
    pub fn damage_taken(&self) -> SeatMap<f64> {
        let mut totals = SeatMap::new(0.0, 0.0);
        for record in &self.rounds {
            totals[record.attacker.other()] += record.report.damage_dealt();
        }
        totals
    }
}
