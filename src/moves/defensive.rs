//! Defensive moves.

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, Result};
use crate::driver::Vitals;

/// A response that spends fuel to scale incoming damage down.
///
/// `damage_reduction` is a fraction: 0.3 lets 70% through, 1.0 blocks all of
/// it. A move with `max_uses` can succeed that many times per race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefensiveMove {
    name: String,
    fuel_cost: f64,
    damage_reduction: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    max_uses: Option<u32>,
    #[serde(skip)]
    uses_remaining: Option<u32>,
}

impl DefensiveMove {
    /// Create an unlimited defensive move.
    pub fn new(
        name: impl Into<String>,
        fuel_cost: f64,
        damage_reduction: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fuel_cost,
            damage_reduction,
            description: description.into(),
            max_uses: None,
            uses_remaining: None,
        }
    }

    /// Limit the move to `max_uses` successful executions.
    #[must_use]
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self.uses_remaining = Some(max_uses);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    #[must_use]
    pub fn damage_reduction(&self) -> f64 {
        self.damage_reduction
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn max_uses(&self) -> Option<u32> {
        self.max_uses
    }

    /// Remaining successful uses; `None` means unlimited.
    #[must_use]
    pub fn uses_remaining(&self) -> Option<u32> {
        self.uses_remaining
    }

    /// Whether the use limit still allows another execution.
    #[must_use]
    pub fn has_uses(&self) -> bool {
        self.uses_remaining.map_or(true, |n| n > 0)
    }

    /// Reset the use counter to `max_uses`.
    ///
    /// Deserialized moves carry no counter, so drivers re-arm on build.
    pub(crate) fn rearm(&mut self) {
        self.uses_remaining = self.max_uses;
    }

    /// Check reduction range, cost and use limit.
    pub fn validate(&self) -> Result<()> {
        super::check_magnitude(&self.name, "fuel_cost", self.fuel_cost)?;
        if !(0.0..=1.0).contains(&self.damage_reduction) {
            return Err(DuelError::InvalidReduction {
                name: self.name.clone(),
                value: self.damage_reduction,
            });
        }
        if self.max_uses == Some(0) {
            return Err(DuelError::InvalidMaxUses {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Damage that gets through this defense.
    #[must_use]
    pub fn mitigate(&self, incoming_damage: f64) -> f64 {
        (incoming_damage * (1.0 - self.damage_reduction)).max(0.0)
    }

    /// Try to defend against `incoming_damage`.
    ///
    /// On refusal the full damage is passed back and nothing changes.
    pub fn execute(&mut self, defender: &mut Vitals, incoming_damage: f64) -> DefenseOutcome {
        if !defender.can_afford(self.fuel_cost) {
            return DefenseOutcome::refused(incoming_damage, DefenseNote::InsufficientFuel);
        }
        if !self.has_uses() {
            return DefenseOutcome::refused(incoming_damage, DefenseNote::NoUsesRemaining);
        }

        defender.debit_fuel(self.fuel_cost);
        if let Some(n) = self.uses_remaining.as_mut() {
            *n -= 1;
        }

        let effective_damage = self.mitigate(incoming_damage);
        DefenseOutcome {
            defense: Some(self.name.clone()),
            effective_damage,
            note: DefenseNote::Reduced {
                from: incoming_damage,
                to: effective_damage,
            },
        }
    }
}

/// Result of a defense attempt: which move held, what damage remains, why.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseOutcome {
    /// Name of the defense that succeeded, if any.
    pub defense: Option<String>,
    /// Damage to apply to the defender's tires.
    pub effective_damage: f64,
    pub note: DefenseNote,
}

impl DefenseOutcome {
    /// Full damage passes through for the given reason.
    #[must_use]
    pub fn refused(incoming_damage: f64, note: DefenseNote) -> Self {
        Self {
            defense: None,
            effective_damage: incoming_damage,
            note,
        }
    }

    /// Did a defense take effect?
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.defense.is_some()
    }
}

/// Why a defense did or didn't take effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DefenseNote {
    Reduced { from: f64, to: f64 },
    InsufficientFuel,
    NoUsesRemaining,
    /// The policy found no eligible defense.
    NoDefense,
}

impl std::fmt::Display for DefenseNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefenseNote::Reduced { from, to } => {
                write!(f, "reduced damage from {from} to {to:.1}")
            }
            DefenseNote::InsufficientFuel => write!(f, "insufficient fuel"),
            DefenseNote::NoUsesRemaining => write!(f, "no uses remaining"),
            DefenseNote::NoDefense => write!(f, "takes full damage"),
        }
    }
}
