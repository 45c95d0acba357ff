//! How a race ended.

use serde::{Deserialize, Serialize};

use crate::core::{Seat, SeatMap};
use crate::driver::Vitals;

/// Winner or draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceResult {
    Winner(Seat),
    Draw,
}

impl RaceResult {
    /// Decide by remaining tire health; equal health is a draw.
    #[must_use]
    pub fn by_tire_health(vitals: &SeatMap<Vitals>) -> Self {
        let first = vitals[Seat::First].tire_health();
        let second = vitals[Seat::Second].tire_health();
        if first > second {
            RaceResult::Winner(Seat::First)
        } else if second > first {
            RaceResult::Winner(Seat::Second)
        } else {
            RaceResult::Draw
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RaceResult::Winner(seat) => Some(*seat),
            RaceResult::Draw => None,
        }
    }
}

/// The condition that ended the race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The loser's tire health reached zero.
    TiresDestroyed { loser: Seat },
    /// The loser ran out of fuel under fuel-sensitive liveness.
    FuelExhausted { loser: Seat },
    /// Both drivers dropped out in the same round.
    BothEliminated,
    /// Nobody could attack for too many rounds in a row.
    Stalemate,
    /// The round cap was reached.
    RoundLimit,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::TiresDestroyed { loser } => write!(f, "{loser} lost due to tire destruction"),
            EndReason::FuelExhausted { loser } => write!(f, "{loser} lost due to running out of fuel"),
            EndReason::BothEliminated => write!(f, "both drivers eliminated"),
            EndReason::Stalemate => write!(f, "stalemate"),
            EndReason::RoundLimit => write!(f, "round limit reached"),
        }
    }
}

/// Final result of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceOutcome {
    pub result: RaceResult,
    pub reason: EndReason,
    /// Rounds played.
    pub rounds: u32,
    pub final_vitals: SeatMap<Vitals>,
}

impl RaceOutcome {
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.result.winner()
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.result == RaceResult::Draw
    }

    /// The winner's vitals at the finish.
    #[must_use]
    pub fn winner_vitals(&self) -> Option<Vitals> {
        self.winner().map(|seat| self.final_vitals[seat])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_tire_health() {
        let vitals = SeatMap::new(Vitals::new(40.0, 0.0), Vitals::new(12.5, 3.0));
        assert_eq!(RaceResult::by_tire_health(&vitals), RaceResult::Winner(Seat::First));

        let vitals = SeatMap::new(Vitals::new(10.0, 0.0), Vitals::new(10.0, 90.0));
        assert_eq!(RaceResult::by_tire_health(&vitals), RaceResult::Draw);
    }

    #[test]
    fn test_winner_vitals() {
        let final_vitals = SeatMap::new(Vitals::new(0.0, 120.0), Vitals::new(35.0, 60.0));
        let outcome = RaceOutcome {
            result: RaceResult::by_tire_health(&final_vitals),
            reason: EndReason::TiresDestroyed { loser: Seat::First },
            rounds: 9,
            final_vitals,
        };
        assert_eq!(outcome.winner(), Some(Seat::Second));
        assert_eq!(outcome.winner_vitals(), Some(Vitals::new(35.0, 60.0)));

        let draw = RaceOutcome {
            result: RaceResult::Draw,
            reason: EndReason::Stalemate,
            ..outcome
        };
        assert_eq!(draw.winner_vitals(), None);
    }

    #[test]
    fn test_reason_display() {
        let reason = EndReason::TiresDestroyed { loser: Seat::Second };
        assert_eq!(reason.to_string(), "Seat 2 lost due to tire destruction");
    }
}
