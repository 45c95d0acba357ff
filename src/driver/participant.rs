//! The driver: vitals, catalog, policy and RNG under one owner.

use crate::core::{DuelError, RaceRng, Result};
use crate::moves::{DefenseNote, DefenseOutcome, DefensiveMove, MoveCatalog, OffenseOutcome, OffensiveMove};
use crate::policy::{InputResolution, MovePolicy, Policy, PolicyKind};

use super::vitals::{Liveness, Vitals};

/// A race participant.
///
/// Drivers are built once per race. Nothing resets their fuel, tires or
/// use counters, so a finished driver is not reusable.
#[derive(Debug)]
pub struct Driver {
    name: String,
    vitals: Vitals,
    catalog: MoveCatalog,
    policy: Policy,
    rng: RaceRng,
}

impl Driver {
    /// Create a driver, rejecting non-positive starting resources.
    pub fn new(
        name: impl Into<String>,
        tire_health: f64,
        fuel: f64,
        catalog: MoveCatalog,
        policy: Policy,
        rng: RaceRng,
    ) -> Result<Self> {
        let name = name.into();
        // NaN fails these comparisons too
        if !(tire_health > 0.0) {
            return Err(DuelError::InvalidTireHealth {
                driver: name,
                value: tire_health,
            });
        }
        if !(fuel > 0.0) {
            return Err(DuelError::InvalidFuel {
                driver: name,
                value: fuel,
            });
        }

        Ok(Self {
            name,
            vitals: Vitals::new(tire_health, fuel),
            catalog,
            policy,
            rng,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    #[must_use]
    pub fn tire_health(&self) -> f64 {
        self.vitals.tire_health()
    }

    #[must_use]
    pub fn fuel(&self) -> f64 {
        self.vitals.fuel()
    }

    #[must_use]
    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    #[must_use]
    pub fn is_alive(&self, liveness: Liveness) -> bool {
        self.vitals.is_alive(liveness)
    }

    /// Ask the policy for an offensive move index.
    pub(crate) fn pick_offense(&mut self) -> Option<usize> {
        self.policy
            .choose_offensive(&self.catalog, &self.vitals, &mut self.rng)
    }

    /// Ask the policy for a defensive move index.
    pub(crate) fn pick_defense(&mut self, incoming_damage: f64) -> Option<usize> {
        self.policy
            .choose_defensive(&self.catalog, &self.vitals, incoming_damage, &mut self.rng)
    }

    /// The offensive move the policy would play now.
    ///
    /// Randomized policies advance the driver's RNG.
    pub fn choose_offensive_move(&mut self) -> Option<&OffensiveMove> {
        let index = self.pick_offense()?;
        Some(&self.catalog.offensive()[index])
    }

    /// The defensive move the policy would play against `incoming_damage`.
    pub fn choose_defensive_move(&mut self, incoming_damage: f64) -> Option<&DefensiveMove> {
        let index = self.pick_defense(incoming_damage)?;
        Some(&self.catalog.defensive()[index])
    }

    /// Attack `opponent` directly, with no defense step.
    pub fn attack(&mut self, opponent: &mut Driver) -> OffenseOutcome {
        match self.pick_offense() {
            Some(index) => {
                self.catalog.offensive()[index].execute(&mut self.vitals, &mut opponent.vitals)
            }
            None => OffenseOutcome::NoAvailableMoves,
        }
    }

    /// Choose and run a defense against `incoming_damage`.
    ///
    /// The returned damage has not been applied yet.
    pub fn defend(&mut self, incoming_damage: f64) -> DefenseOutcome {
        match self.pick_defense(incoming_damage) {
            Some(index) => self
                .catalog
                .defensive_mut(index)
                .execute(&mut self.vitals, incoming_damage),
            None => DefenseOutcome::refused(incoming_damage, DefenseNote::NoDefense),
        }
    }

    /// How the driver's last external command was resolved, cleared on read.
    ///
    /// Always `None` for policies that don't listen for commands.
    pub fn take_input(&mut self) -> Option<InputResolution> {
        self.policy.take_input()
    }

    /// Apply damage to tire health, clamped at zero.
    pub fn take_damage(&mut self, damage: f64) {
        self.vitals.apply_damage(damage);
    }

    pub(crate) fn debit_fuel(&mut self, amount: f64) {
        self.vitals.debit_fuel(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RandomEligible;

    fn driver(name: &str, fuel: f64) -> Driver {
        let mut catalog = MoveCatalog::new();
        catalog
            .add_offensive(OffensiveMove::new("Corner Mastery", 25.0, 7.0, ""))
            .unwrap();
        catalog
            .add_defensive(DefensiveMove::new("Slipstream Cut", 20.0, 0.4, ""))
            .unwrap();
        Driver::new(
            name,
            100.0,
            fuel,
            catalog,
            Policy::RandomEligible(RandomEligible),
            RaceRng::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_positive_start() {
        let err = Driver::new(
            "Ghost",
            0.0,
            100.0,
            MoveCatalog::new(),
            Policy::RandomEligible(RandomEligible),
            RaceRng::new(0),
        )
        .unwrap_err();
        assert!(matches!(err, DuelError::InvalidTireHealth { .. }));

        let err = Driver::new(
            "Ghost",
            100.0,
            -1.0,
            MoveCatalog::new(),
            Policy::RandomEligible(RandomEligible),
            RaceRng::new(0),
        )
        .unwrap_err();
        assert!(matches!(err, DuelError::InvalidFuel { .. }));

        let err = Driver::new(
            "Ghost",
            f64::NAN,
            100.0,
            MoveCatalog::new(),
            Policy::RandomEligible(RandomEligible),
            RaceRng::new(0),
        )
        .unwrap_err();
        assert!(matches!(err, DuelError::InvalidTireHealth { .. }));
    }

    #[test]
    fn test_attack_lands_without_defense() {
        let mut a = driver("A", 100.0);
        let mut b = driver("B", 100.0);

        let outcome = a.attack(&mut b);

        assert!(outcome.is_hit());
        assert_eq!(a.fuel(), 75.0);
        assert_eq!(b.tire_health(), 93.0);
        assert_eq!(b.fuel(), 100.0);
    }

    #[test]
    fn test_attack_with_no_affordable_move() {
        let mut a = driver("A", 10.0);
        let mut b = driver("B", 100.0);

        assert!(a.choose_offensive_move().is_none());
        assert_eq!(a.attack(&mut b), OffenseOutcome::NoAvailableMoves);
        assert_eq!(a.fuel(), 10.0);
        assert_eq!(b.tire_health(), 100.0);
    }

    #[test]
    fn test_defend_without_options_takes_full_damage() {
        let mut b = driver("B", 5.0);

        let outcome = b.defend(12.0);

        assert_eq!(outcome.defense, None);
        assert_eq!(outcome.effective_damage, 12.0);
        assert_eq!(outcome.note.to_string(), "takes full damage");
        assert_eq!(b.fuel(), 5.0);
    }

    #[test]
    fn test_defend_does_not_apply_damage() {
        let mut b = driver("B", 100.0);
        let outcome = b.defend(10.0);

        assert!(outcome.succeeded());
        assert!((outcome.effective_damage - 6.0).abs() < 1e-9);
        assert_eq!(b.tire_health(), 100.0);

        b.take_damage(outcome.effective_damage);
        assert!((b.tire_health() - 94.0).abs() < 1e-9);
    }

    #[test]
    fn test_take_damage_never_negative() {
        let mut b = driver("B", 100.0);
        b.take_damage(250.0);
        assert_eq!(b.tire_health(), 0.0);
        assert!(!b.is_alive(Liveness::TireOnly));
    }
}
