//! Structured race events and the sinks that receive them.
//!
//! The race controller reports everything it does as [`DuelEvent`] values.
//! A presentation layer formats them however it wants; the engine never
//! writes to the console itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::{TurnAction, TurnReport};
use crate::core::{Seat, SeatMap};
use crate::driver::Vitals;

use super::outcome::RaceOutcome;

/// Something that happened during a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DuelEvent {
    /// Emitted once, before round 1.
    RaceStarted {
        drivers: SeatMap<String>,
        first_attacker: Seat,
    },
    /// A turn was resolved.
    Turn { round: u32, report: TurnReport },
    /// A round finished. `next_attacker` is `None` once the race is over.
    RoundEnded {
        round: u32,
        vitals: SeatMap<Vitals>,
        next_attacker: Option<Seat>,
    },
    Finished(RaceOutcome),
}

/// Receives race events.
pub trait EventSink {
    fn emit(&mut self, event: &DuelEvent);
}

impl EventSink for Vec<DuelEvent> {
    fn emit(&mut self, event: &DuelEvent) {
        self.push(event.clone());
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &DuelEvent) {}
}

/// Forwards events to `tracing` as structured fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &DuelEvent) {
        match event {
            DuelEvent::RaceStarted {
                drivers,
                first_attacker,
            } => info!(
                first = drivers[Seat::First].as_str(),
                second = drivers[Seat::Second].as_str(),
                first_attacker = %first_attacker,
                "race started"
            ),
            DuelEvent::Turn { round, report } => match &report.action {
                TurnAction::Idle(reason) => info!(
                    round,
                    attacker = report.attacker.as_str(),
                    reason = %reason,
                    "idle turn"
                ),
                TurnAction::Exchange(ex) => info!(
                    round,
                    attacker = report.attacker.as_str(),
                    defender = report.defender.as_str(),
                    offense = ex.offense.as_str(),
                    defense = ex.defense.defense.as_deref().unwrap_or("-"),
                    raw_damage = ex.raw_damage,
                    final_damage = ex.final_damage,
                    attacker_fuel = ex.attacker_fuel,
                    defender_tire_health = ex.defender_tire_health,
                    "turn"
                ),
            },
            DuelEvent::RoundEnded { round, vitals, .. } => debug!(
                round,
                first_tire_health = vitals[Seat::First].tire_health(),
                first_fuel = vitals[Seat::First].fuel(),
                second_tire_health = vitals[Seat::Second].tire_health(),
                second_fuel = vitals[Seat::Second].fuel(),
                "round ended"
            ),
            DuelEvent::Finished(outcome) => info!(
                winner = ?outcome.winner(),
                reason = %outcome.reason,
                rounds = outcome.rounds,
                "race finished"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::IdleReason;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<DuelEvent> = Vec::new();
        let turn = DuelEvent::Turn {
            round: 1,
            report: TurnReport {
                attacker: "A".into(),
                defender: "B".into(),
                action: TurnAction::Idle(IdleReason::NoMoves),
                attacker_input: None,
                defender_input: None,
            },
        };
        let ended = DuelEvent::RoundEnded {
            round: 1,
            vitals: SeatMap::new(Vitals::new(100.0, 5.0), Vitals::new(100.0, 5.0)),
            next_attacker: Some(Seat::Second),
        };

        sink.emit(&turn);
        sink.emit(&ended);
        NullSink.emit(&turn);
        TracingSink.emit(&turn);

        assert_eq!(sink, vec![turn, ended]);
    }
}
