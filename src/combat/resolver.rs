//! Combat resolver.

use tracing::debug;

use crate::driver::Driver;

use super::report::{Exchange, IdleReason, TurnAction, TurnReport};

/// Runs exchanges between two drivers.
pub struct CombatResolver;

impl CombatResolver {
    /// Resolve one turn of `attacker` against `defender`.
    ///
    /// 1. the attacker's policy picks an offensive move; none, or one it
    ///    can't afford, makes the turn a no-op
    /// 2. the defender responds to the move's raw impact
    /// 3. the attacker pays the move's cost whatever the defense did
    /// 4. the mitigated damage is applied to the defender, clamped at zero
    pub fn resolve_turn(attacker: &mut Driver, defender: &mut Driver) -> TurnReport {
        let names = (attacker.name().to_string(), defender.name().to_string());
        let report = move |action, attacker_input, defender_input| TurnReport {
            attacker: names.0,
            defender: names.1,
            action,
            attacker_input,
            defender_input,
        };

        let picked = attacker.pick_offense();
        let attacker_input = attacker.take_input();
        let Some(index) = picked else {
            debug!(
                attacker = attacker.name(),
                fuel = attacker.fuel(),
                cheapest = ?attacker.catalog().cheapest_offense(),
                "no affordable offensive move"
            );
            return report(TurnAction::Idle(IdleReason::NoMoves), attacker_input, None);
        };
        let offense = attacker.catalog().offensive()[index].clone();

        if !attacker.vitals().can_afford(offense.fuel_cost()) {
            debug!(
                attacker = attacker.name(),
                move_name = offense.name(),
                "chosen move unaffordable"
            );
            let idle = TurnAction::Idle(IdleReason::InsufficientFuel {
                move_name: offense.name().to_string(),
                required: offense.fuel_cost(),
                available: attacker.fuel(),
            });
            return report(idle, attacker_input, None);
        }

        let raw_damage = offense.impact();
        let defense = defender.defend(raw_damage);
        let defender_input = defender.take_input();
        attacker.debit_fuel(offense.fuel_cost());
        defender.take_damage(defense.effective_damage);

        debug!(
            attacker = attacker.name(),
            defender = defender.name(),
            offense = offense.name(),
            defense = defense.defense.as_deref().unwrap_or("-"),
            raw_damage,
            final_damage = defense.effective_damage,
            attacker_fuel = attacker.fuel(),
            defender_tire_health = defender.tire_health(),
            "turn resolved"
        );

        let exchange = Exchange {
            offense: offense.name().to_string(),
            description: offense.description().to_string(),
            raw_damage,
            fuel_spent: offense.fuel_cost(),
            final_damage: defense.effective_damage,
            defense,
            attacker_fuel: attacker.fuel(),
            defender_tire_health: defender.tire_health(),
            defender_fuel: defender.fuel(),
        };
        report(TurnAction::Exchange(exchange), attacker_input, defender_input)
    }
}
