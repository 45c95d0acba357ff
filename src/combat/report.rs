//! Turn reports.

use serde::{Deserialize, Serialize};

use crate::moves::DefenseOutcome;
use crate::policy::InputResolution;

/// What happened in one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub attacker: String,
    pub defender: String,
    pub action: TurnAction,
    /// How the attacker's external command was handled, for interactive drivers.
    pub attacker_input: Option<InputResolution>,
    /// Same for the defender's response.
    pub defender_input: Option<InputResolution>,
}

impl TurnReport {
    /// Did the attacker fail to act?
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.action, TurnAction::Idle(_))
    }

    /// Was the attacker out of affordable offensive moves?
    #[must_use]
    pub fn had_no_moves(&self) -> bool {
        matches!(self.action, TurnAction::Idle(IdleReason::NoMoves))
    }

    /// Damage that reached the defender's tires.
    #[must_use]
    pub fn damage_dealt(&self) -> f64 {
        match &self.action {
            TurnAction::Exchange(ex) => ex.final_damage,
            TurnAction::Idle(_) => 0.0,
        }
    }

    /// Did either driver fall back to a random move after failed commands?
    #[must_use]
    pub fn used_input_fallback(&self) -> bool {
        [&self.attacker_input, &self.defender_input]
            .into_iter()
            .flatten()
            .any(|r| matches!(r, InputResolution::Fallback { .. }))
    }

    #[must_use]
    pub fn exchange(&self) -> Option<&Exchange> {
        match &self.action {
            TurnAction::Exchange(ex) => Some(ex),
            TurnAction::Idle(_) => None,
        }
    }
}

impl std::fmt::Display for TurnReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            TurnAction::Idle(reason) => write!(f, "{}: {reason}", self.attacker),
            TurnAction::Exchange(ex) => write!(
                f,
                "{} used {} on {}; {} {}; {:.1} damage dealt",
                self.attacker,
                ex.offense,
                self.defender,
                self.defender,
                ex.defense.note,
                ex.final_damage
            ),
        }
    }
}

/// The turn either produced an exchange or nothing at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnAction {
    Idle(IdleReason),
    Exchange(Exchange),
}

/// Why the attacker did nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IdleReason {
    /// The policy found no affordable offensive move.
    NoMoves,
    /// The policy picked a move the attacker can't pay for.
    InsufficientFuel {
        move_name: String,
        required: f64,
        available: f64,
    },
}

impl std::fmt::Display for IdleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdleReason::NoMoves => write!(f, "no moves"),
            IdleReason::InsufficientFuel {
                move_name,
                required,
                available,
            } => write!(
                f,
                "insufficient fuel for {move_name} ({available} of {required})"
            ),
        }
    }
}

/// A resolved attack and defense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub offense: String,
    pub description: String,
    /// Impact offered to the defender before mitigation.
    pub raw_damage: f64,
    pub fuel_spent: f64,
    pub defense: DefenseOutcome,
    /// Damage applied to the defender's tires.
    pub final_damage: f64,
    pub attacker_fuel: f64,
    pub defender_tire_health: f64,
    pub defender_fuel: f64,
}

impl Exchange {
    /// Damage absorbed by the defense.
    #[must_use]
    pub fn blocked(&self) -> f64 {
        self.raw_damage - self.final_damage
    }
}
