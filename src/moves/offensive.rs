//! Offensive moves.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::driver::Vitals;

/// An attack that spends fuel to damage the opponent's tires.
///
/// ## Example
///
/// ```
/// use grid_duel::driver::Vitals;
/// use grid_duel::moves::OffensiveMove;
///
/// let drs = OffensiveMove::new("DRS Boost", 45.0, 12.0, "Straight-line speed.");
/// let mut me = Vitals::new(100.0, 500.0);
/// let mut them = Vitals::new(100.0, 500.0);
///
/// assert!(drs.execute(&mut me, &mut them).is_hit());
/// assert_eq!(me.fuel(), 455.0);
/// assert_eq!(them.tire_health(), 88.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffensiveMove {
    name: String,
    fuel_cost: f64,
    impact: f64,
    #[serde(default)]
    description: String,
}

impl OffensiveMove {
    /// Create an offensive move.
    pub fn new(
        name: impl Into<String>,
        fuel_cost: f64,
        impact: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fuel_cost,
            impact,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    /// Raw tire damage dealt before any defense.
    #[must_use]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Damage per unit of fuel. Infinite for a free move, zero if it does nothing.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        if self.impact == 0.0 {
            return 0.0;
        }
        self.impact / self.fuel_cost
    }

    /// Check that cost and impact are usable numbers.
    pub fn validate(&self) -> Result<()> {
        super::check_magnitude(&self.name, "fuel_cost", self.fuel_cost)?;
        super::check_magnitude(&self.name, "impact", self.impact)
    }

    /// Run the move directly, without giving the target a chance to defend.
    ///
    /// Either both the fuel debit and the damage happen, or neither does.
    pub fn execute(&self, attacker: &mut Vitals, defender: &mut Vitals) -> OffenseOutcome {
        if !attacker.can_afford(self.fuel_cost) {
            return OffenseOutcome::InsufficientFuel {
                move_name: self.name.clone(),
                required: self.fuel_cost,
                available: attacker.fuel(),
            };
        }

        attacker.debit_fuel(self.fuel_cost);
        defender.apply_damage(self.impact);
        OffenseOutcome::Hit {
            move_name: self.name.clone(),
            damage: self.impact,
        }
    }
}

/// Result of an unopposed attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OffenseOutcome {
    /// Fuel was spent and the damage landed.
    Hit { move_name: String, damage: f64 },
    /// The move costs more than the attacker has; nothing changed.
    InsufficientFuel {
        move_name: String,
        required: f64,
        available: f64,
    },
    /// The policy found nothing affordable; nothing changed.
    NoAvailableMoves,
}

impl OffenseOutcome {
    /// Did the attack land?
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, OffenseOutcome::Hit { .. })
    }
}

impl std::fmt::Display for OffenseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffenseOutcome::Hit { move_name, damage } => {
                write!(f, "used {move_name} to deal {damage} tire damage")
            }
            OffenseOutcome::InsufficientFuel {
                move_name,
                required,
                available,
            } => write!(
                f,
                "can't use {move_name}: needs {required} fuel, has {available}"
            ),
            OffenseOutcome::NoAvailableMoves => write!(f, "no available moves"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surge() -> OffensiveMove {
        OffensiveMove::new("Red Bull Surge", 80.0, 20.0, "Aggressive acceleration.")
    }

    #[test]
    fn test_execute_debits_and_damages() {
        let mut attacker = Vitals::new(100.0, 100.0);
        let mut defender = Vitals::new(100.0, 100.0);

        let outcome = surge().execute(&mut attacker, &mut defender);

        assert!(outcome.is_hit());
        assert_eq!(attacker.fuel(), 20.0);
        assert_eq!(defender.tire_health(), 80.0);
        assert_eq!(defender.fuel(), 100.0);
    }

    #[test]
    fn test_insufficient_fuel_is_a_noop() {
        let mut attacker = Vitals::new(100.0, 79.0);
        let mut defender = Vitals::new(100.0, 100.0);

        for _ in 0..3 {
            let outcome = surge().execute(&mut attacker, &mut defender);
            assert!(matches!(outcome, OffenseOutcome::InsufficientFuel { .. }));
        }

        assert_eq!(attacker.fuel(), 79.0);
        assert_eq!(defender.tire_health(), 100.0);
    }

    #[test]
    fn test_exact_fuel_is_enough() {
        let mut attacker = Vitals::new(100.0, 80.0);
        let mut defender = Vitals::new(100.0, 100.0);

        assert!(surge().execute(&mut attacker, &mut defender).is_hit());
        assert_eq!(attacker.fuel(), 0.0);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut attacker = Vitals::new(100.0, 500.0);
        let mut defender = Vitals::new(5.0, 100.0);

        surge().execute(&mut attacker, &mut defender);
        assert_eq!(defender.tire_health(), 0.0);
    }

    #[test]
    fn test_efficiency() {
        let turn = OffensiveMove::new("Precision Turn", 30.0, 8.0, "");
        assert!((turn.efficiency() - 8.0 / 30.0).abs() < 1e-12);

        assert_eq!(OffensiveMove::new("Coast", 0.0, 0.0, "").efficiency(), 0.0);
        assert_eq!(OffensiveMove::new("Free", 0.0, 3.0, "").efficiency(), f64::INFINITY);
    }

    #[test]
    fn test_validate_rejects_negative_cost() {
        let bad = OffensiveMove::new("Reverse", -5.0, 1.0, "");
        assert!(bad.validate().is_err());
        assert!(surge().validate().is_ok());
    }

    #[test]
    fn test_outcome_display() {
        let hit = OffenseOutcome::Hit {
            move_name: "DRS Boost".into(),
            damage: 12.0,
        };
        assert_eq!(hit.to_string(), "used DRS Boost to deal 12 tire damage");
        assert_eq!(OffenseOutcome::NoAvailableMoves.to_string(), "no available moves");
    }
}
