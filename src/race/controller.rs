//! The race state machine.

use im::Vector;
use tracing::{debug, info};

use crate::combat::CombatResolver;
use crate::core::{Seat, SeatMap};
use crate::driver::{Driver, Vitals};

use super::config::RaceConfig;
use super::event::{DuelEvent, EventSink};
use super::outcome::{EndReason, RaceOutcome, RaceResult};
use super::record::{RaceRecord, RoundRecord};

/// Where the race stands.
#[derive(Clone, Debug, PartialEq)]
pub enum RaceStatus {
    Active,
    Finished(RaceOutcome),
}

/// Two drivers taking turns until one drops out.
///
/// Each [`step`](Race::step) plays one round: the current attacker acts on
/// the current defender, liveness is checked, and the roles swap.
#[derive(Debug)]
pub struct Race {
    drivers: SeatMap<Driver>,
    config: RaceConfig,
    round_number: u32,
    attacker: Seat,
    idle_streak: u32,
    status: RaceStatus,
    history: Vector<RoundRecord>,
}

impl Race {
    #[must_use]
    pub fn new(first: Driver, second: Driver, config: RaceConfig) -> Self {
        Self {
            drivers: SeatMap::new(first, second),
            attacker: config.first_attacker,
            config,
            round_number: 0,
            idle_streak: 0,
            status: RaceStatus::Active,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The seat attacking next.
    #[must_use]
    pub fn attacker(&self) -> Seat {
        self.attacker
    }

    #[must_use]
    pub fn defender(&self) -> Seat {
        self.attacker.other()
    }

    #[must_use]
    pub fn driver(&self, seat: Seat) -> &Driver {
        &self.drivers[seat]
    }

    #[must_use]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> &RaceStatus {
        &self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, RaceStatus::Finished(_))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RaceOutcome> {
        match &self.status {
            RaceStatus::Finished(outcome) => Some(outcome),
            RaceStatus::Active => None,
        }
    }

    #[must_use]
    pub fn history(&self) -> &Vector<RoundRecord> {
        &self.history
    }

    #[must_use]
    pub fn vitals(&self) -> SeatMap<Vitals> {
        self.drivers.map(Driver::vitals)
    }

    /// Play one round. Returns `None` once the race is finished.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Option<RoundRecord> {
        if self.is_finished() {
            return None;
        }
        if self.round_number == 0 {
            let drivers = self.drivers.map(|d| d.name().to_string());
            info!(
                first = drivers[Seat::First].as_str(),
                second = drivers[Seat::Second].as_str(),
                "race started"
            );
            sink.emit(&DuelEvent::RaceStarted {
                drivers,
                first_attacker: self.attacker,
            });
        }

        self.round_number += 1;
        let round = self.round_number;
        let attacker = self.attacker;

        let (offense, defense) = self.drivers.pair_mut(attacker);
        let report = CombatResolver::resolve_turn(offense, defense);
        if report.is_idle() {
            self.idle_streak += 1;
        } else {
            self.idle_streak = 0;
        }
        sink.emit(&DuelEvent::Turn {
            round,
            report: report.clone(),
        });

        let vitals = self.vitals();
        let record = RoundRecord {
            round,
            attacker,
            report,
            vitals: vitals.clone(),
        };
        self.history.push_back(record.clone());

        let finish = self.check_finish(&vitals);
        if finish.is_none() {
            self.attacker = attacker.other();
        }
        sink.emit(&DuelEvent::RoundEnded {
            round,
            vitals: vitals.clone(),
            next_attacker: finish.map_or(Some(self.attacker), |_| None),
        });

        if let Some((result, reason)) = finish {
            let outcome = RaceOutcome {
                result,
                reason,
                rounds: round,
                final_vitals: vitals,
            };
            info!(winner = ?outcome.winner(), reason = %reason, rounds = round, "race finished");
            sink.emit(&DuelEvent::Finished(outcome.clone()));
            self.status = RaceStatus::Finished(outcome);
        }
        Some(record)
    }

    /// Play rounds until the race ends.
    pub fn run(&mut self, sink: &mut impl EventSink) -> RaceOutcome {
        loop {
            if let RaceStatus::Finished(outcome) = &self.status {
                return outcome.clone();
            }
            self.step(sink);
        }
    }

    /// Snapshot of the race so far.
    #[must_use]
    pub fn record(&self) -> RaceRecord {
        RaceRecord {
            drivers: self.drivers.map(|d| d.name().to_string()),
            config: self.config.clone(),
            rounds: self.history.clone(),
            outcome: self.outcome().cloned(),
        }
    }

    fn check_finish(&self, vitals: &SeatMap<Vitals>) -> Option<(RaceResult, EndReason)> {
        let liveness = self.config.liveness;
        let alive = vitals.map(|v| v.is_alive(liveness));

        match (alive[Seat::First], alive[Seat::Second]) {
            (true, false) => return Some(eliminated(Seat::Second, vitals)),
            (false, true) => return Some(eliminated(Seat::First, vitals)),
            (false, false) => {
                return Some((RaceResult::by_tire_health(vitals), EndReason::BothEliminated))
            }
            (true, true) => {}
        }

        if let Some(limit) = self.config.stalemate_limit() {
            if self.idle_streak >= limit {
                debug!(idle_streak = self.idle_streak, "stalemate");
                return Some((RaceResult::by_tire_health(vitals), EndReason::Stalemate));
            }
        }

        if self.round_number >= self.config.max_rounds {
            return Some((RaceResult::by_tire_health(vitals), EndReason::RoundLimit));
        }
        None
    }
}

fn eliminated(loser: Seat, vitals: &SeatMap<Vitals>) -> (RaceResult, EndReason) {
    let reason = if vitals[loser].tire_health() <= 0.0 {
        EndReason::TiresDestroyed { loser }
    } else {
        EndReason::FuelExhausted { loser }
    };
    (RaceResult::Winner(loser.other()), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverConfig, Liveness};
    use crate::moves::{DefensiveMove, OffensiveMove};

    fn hitter(name: &str, fuel: f64, impact: f64) -> Driver {
        DriverConfig::new(name)
            .with_fuel(fuel)
            .with_offensive(OffensiveMove::new("Hit", 10.0, impact, ""))
            .build()
            .unwrap()
    }

    #[test]
    fn test_roles_swap_each_round() {
        let mut race = Race::new(
            hitter("A", 100.0, 1.0),
            hitter("B", 100.0, 1.0),
            RaceConfig::default(),
        );
        let mut sink = crate::race::NullSink;

        assert_eq!(race.step(&mut sink).unwrap().attacker, Seat::First);
        assert_eq!(race.attacker(), Seat::Second);
        assert_eq!(race.step(&mut sink).unwrap().attacker, Seat::Second);
        assert_eq!(race.attacker(), Seat::First);
        assert_eq!(race.round_number(), 2);
    }

    #[test]
    fn test_knockout_names_loser() {
        let mut race = Race::new(
            hitter("A", 100.0, 150.0),
            hitter("B", 100.0, 1.0),
            RaceConfig::default(),
        );
        let outcome = race.run(&mut crate::race::NullSink);

        assert_eq!(outcome.result, RaceResult::Winner(Seat::First));
        assert_eq!(outcome.reason, EndReason::TiresDestroyed { loser: Seat::Second });
        assert_eq!(outcome.rounds, 1);
        assert!(race.step(&mut crate::race::NullSink).is_none());
        assert_eq!(race.round_number(), 1);
    }

    #[test]
    fn test_fuel_exhaustion_only_counts_when_enabled() {
        // A spends its last 10 fuel in round 1.
        let config = RaceConfig::default().with_liveness(Liveness::TireAndFuel);
        let mut race = Race::new(hitter("A", 10.0, 1.0), hitter("B", 100.0, 1.0), config);
        let outcome = race.run(&mut crate::race::NullSink);
        assert_eq!(outcome.reason, EndReason::FuelExhausted { loser: Seat::First });
        assert_eq!(outcome.winner(), Some(Seat::Second));

        let mut race = Race::new(
            hitter("A", 10.0, 1.0),
            hitter("B", 100.0, 1.0),
            RaceConfig::default(),
        );
        race.step(&mut crate::race::NullSink);
        assert!(!race.is_finished());
    }

    #[test]
    fn test_stalemate_and_round_cap() {
        let idle = || DriverConfig::new("Idle").with_fuel(5.0).build().unwrap();

        let mut race = Race::new(idle(), idle(), RaceConfig::default());
        let outcome = race.run(&mut crate::race::NullSink);
        assert_eq!(outcome.reason, EndReason::Stalemate);
        assert_eq!(outcome.rounds, 2);
        assert!(outcome.is_draw());

        let config = RaceConfig::default()
            .with_stalemate_after(None)
            .with_max_rounds(7);
        let mut race = Race::new(idle(), idle(), config);
        let outcome = race.run(&mut crate::race::NullSink);
        assert_eq!(outcome.reason, EndReason::RoundLimit);
        assert_eq!(outcome.rounds, 7);
    }

    #[test]
    fn test_zero_stalemate_threshold_never_fires() {
        let mut config = RaceConfig::default().with_max_rounds(6);
        config.stalemate_after = Some(0);
        let mut race = Race::new(
            hitter("A", 100.0, 1.0),
            hitter("B", 100.0, 1.0),
            config,
        );
        let outcome = race.run(&mut crate::race::NullSink);

        assert_eq!(outcome.reason, EndReason::RoundLimit);
        assert_eq!(outcome.rounds, 6);
    }

    #[test]
    fn test_history_tracks_rounds() {
        let shield = DriverConfig::new("Wall")
            .with_offensive(OffensiveMove::new("Hit", 10.0, 5.0, ""))
            .with_defensive(DefensiveMove::new("Block", 1.0, 1.0, ""))
            .build()
            .unwrap();
        let config = RaceConfig::default().with_max_rounds(4);
        let mut race = Race::new(hitter("A", 100.0, 5.0), shield, config);
        race.run(&mut crate::race::NullSink);

        let record = race.record();
        assert_eq!(record.rounds.len(), 4);
        let rounds: Vec<u32> = record.rounds.iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2, 3, 4]);
        assert_eq!(record.damage_taken()[Seat::Second], 0.0);
        assert_eq!(record.damage_taken()[Seat::First], 10.0);
        assert_eq!(record.outcome.unwrap().winner(), Some(Seat::Second));
    }
}
