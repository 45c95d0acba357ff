//! Driver resources.

use serde::{Deserialize, Serialize};

/// Which resources keep a driver in the race.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    /// Alive while tire health is above zero.
    #[default]
    TireOnly,
    /// Alive while both tire health and fuel are above zero.
    TireAndFuel,
}

/// Tire health and fuel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    tire_health: f64,
    fuel: f64,
}

impl Vitals {
    /// Create vitals. Negative tire health is clamped to zero.
    #[must_use]
    pub fn new(tire_health: f64, fuel: f64) -> Self {
        Self {
            tire_health: tire_health.max(0.0),
            fuel,
        }
    }

    #[must_use]
    pub fn tire_health(&self) -> f64 {
        self.tire_health
    }

    #[must_use]
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Is there enough fuel for a move of this cost?
    #[must_use]
    pub fn can_afford(&self, cost: f64) -> bool {
        self.fuel >= cost
    }

    #[must_use]
    pub fn is_alive(&self, liveness: Liveness) -> bool {
        match liveness {
            Liveness::TireOnly => self.tire_health > 0.0,
            Liveness::TireAndFuel => self.tire_health > 0.0 && self.fuel > 0.0,
        }
    }

    pub(crate) fn debit_fuel(&mut self, amount: f64) {
        self.fuel -= amount;
    }

    /// Subtract damage from tire health, never going below zero.
    pub(crate) fn apply_damage(&mut self, damage: f64) {
        self.tire_health = (self.tire_health - damage).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_damage_clamps() {
        let mut v = Vitals::new(10.0, 100.0);
        v.apply_damage(4.0);
        assert_eq!(v.tire_health(), 6.0);
        v.apply_damage(50.0);
        assert_eq!(v.tire_health(), 0.0);
    }

    #[test]
    fn test_new_clamps_negative_health() {
        assert_eq!(Vitals::new(-3.0, 1.0).tire_health(), 0.0);
    }

    #[test]
    fn test_liveness_rules() {
        let dry = Vitals::new(50.0, 0.0);
        assert!(dry.is_alive(Liveness::TireOnly));
        assert!(!dry.is_alive(Liveness::TireAndFuel));

        let flat = Vitals::new(0.0, 300.0);
        assert!(!flat.is_alive(Liveness::TireOnly));
        assert!(!flat.is_alive(Liveness::TireAndFuel));
    }

    #[test]
    fn test_can_afford_is_inclusive() {
        let v = Vitals::new(100.0, 45.0);
        assert!(v.can_afford(45.0));
        assert!(!v.can_afford(45.5));
    }

    #[test]
    fn test_liveness_serde_names() {
        let json = serde_json::to_string(&Liveness::TireAndFuel).unwrap();
        assert_eq!(json, "\"tire_and_fuel\"");
    }
}
