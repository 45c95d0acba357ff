//! Threshold-and-score policy.
//!
//! ## Offense
//!
//! Branches on fuel:
//! - above `high_fuel`: the signature move if set and affordable, else the
//!   highest impact
//! - below `low_fuel`: the signature move if set and affordable, else the best
//!   impact per fuel
//! - otherwise the best composite of damage, fuel conservation and efficiency,
//!   each normalized by the driver's reference constants
//!
//! ## Defense
//!
//! First match wins:
//! 1. reserve defense when tires are critical or the hit is big
//! 2. lethal hit: strongest reduction
//! 3. hit at or above `high_damage`: strongest of the defenses reaching
//!    `min_strength`, else the first eligible
//! 4. low fuel or small hit: cheapest
//! 5. best composite of reduction and fuel conservation
//!
//! Every arg-max keeps the earlier catalog entry on ties, and nothing here
//! touches the RNG.

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, RaceRng, Result};
use crate::driver::Vitals;
use crate::moves::MoveCatalog;

use super::{arg_max, eligible_defense, eligible_offense, Eligible, MovePolicy};

/// Fuel cost at which the conservation score reaches zero.
const FUEL_SCALE: f64 = 100.0;

/// A named defense saved for emergencies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReserveDefense {
    pub move_name: String,
    /// Use it when tire health is at or below this.
    pub critical_health: f64,
    /// Use it when incoming damage is at or above this.
    pub trigger_damage: f64,
}

/// Per-driver thresholds and normalization constants.
///
/// Missing numeric fields take the Verstappen values when deserialized;
/// missing optional rules stay off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Fuel strictly above this plays for raw damage.
    pub high_fuel: f64,
    /// Fuel strictly below this plays for efficiency.
    pub low_fuel: f64,
    /// Reference impact for the composite damage score.
    pub damage_norm: f64,
    /// Reference impact-per-fuel for the composite efficiency score.
    pub efficiency_norm: f64,
    #[serde(default)]
    pub high_fuel_signature: Option<String>,
    #[serde(default)]
    pub low_fuel_signature: Option<String>,

    /// Incoming damage at or above this calls for a strong defense.
    pub high_damage: f64,
    /// Minimum reduction that counts as strong.
    pub min_strength: f64,
    /// Fuel strictly below this plays the cheapest defense.
    #[serde(default)]
    pub low_fuel_defense: Option<f64>,
    /// Incoming damage at or below this plays the cheapest defense.
    #[serde(default)]
    pub low_damage: Option<f64>,
    /// Reference reduction for the composite defense score.
    pub reduction_norm: f64,
    #[serde(default)]
    pub reserve: Option<ReserveDefense>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self::verstappen()
    }
}

impl HeuristicConfig {
    /// Aggressive early, efficient late; no reserved moves.
    #[must_use]
    pub fn verstappen() -> Self {
        Self {
            high_fuel: 300.0,
            low_fuel: 150.0,
            damage_norm: 20.0,
            efficiency_norm: 0.3,
            high_fuel_signature: None,
            low_fuel_signature: None,
            high_damage: 18.0,
            min_strength: 0.5,
            low_fuel_defense: Some(60.0),
            low_damage: None,
            reduction_norm: 2.0,
            reserve: None,
        }
    }

    /// Calculated: signature moves per fuel tier and a saved full block.
    #[must_use]
    pub fn mostafa() -> Self {
        Self {
            high_fuel: 350.0,
            low_fuel: 175.0,
            damage_norm: 22.0,
            efficiency_norm: 0.3,
            high_fuel_signature: Some("Mercedes Charge".into()),
            low_fuel_signature: Some("Corner Mastery".into()),
            high_damage: 20.0,
            min_strength: 1.0,
            low_fuel_defense: None,
            low_damage: Some(15.0),
            reduction_norm: 5.0,
            reserve: Some(ReserveDefense {
                move_name: "Aggressive Block".into(),
                critical_health: 25.0,
                trigger_damage: 20.0,
            }),
        }
    }

    /// Every move named here must exist with the right kind in `catalog`.
    pub(crate) fn check_moves(&self, driver: &str, catalog: &MoveCatalog) -> Result<()> {
        let unknown = |name: &str| DuelError::UnknownMove {
            driver: driver.to_string(),
            name: name.to_string(),
        };
        for name in [&self.high_fuel_signature, &self.low_fuel_signature]
            .into_iter()
            .flatten()
        {
            catalog.offensive_index(name).ok_or_else(|| unknown(name))?;
        }
        if let Some(reserve) = &self.reserve {
            catalog
                .defensive_index(&reserve.move_name)
                .ok_or_else(|| unknown(&reserve.move_name))?;
        }
        Ok(())
    }
}

/// Deterministic policy driven by a `HeuristicConfig`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicPolicy {
    config: HeuristicConfig,
}

impl HeuristicPolicy {
    #[must_use]
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Offensive choice; a pure function of catalog and vitals.
    #[must_use]
    pub fn pick_offense(&self, catalog: &MoveCatalog, vitals: &Vitals) -> Option<usize> {
        let eligible = eligible_offense(catalog, vitals);
        if eligible.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let moves = catalog.offensive();
        let fuel = vitals.fuel();

        if fuel > cfg.high_fuel {
            named(signature(catalog, cfg.high_fuel_signature.as_deref()), &eligible)
                .or_else(|| arg_max(&eligible, |i| moves[i].impact()))
        } else if fuel < cfg.low_fuel {
            named(signature(catalog, cfg.low_fuel_signature.as_deref()), &eligible)
                .or_else(|| arg_max(&eligible, |i| moves[i].efficiency()))
        } else {
            arg_max(&eligible, |i| {
                let m = &moves[i];
                let damage = m.impact() / cfg.damage_norm;
                let conservation = (FUEL_SCALE - m.fuel_cost()) / FUEL_SCALE;
                let efficiency = m.efficiency() / cfg.efficiency_norm;
                (damage + conservation + efficiency) / 3.0
            })
        }
    }

    /// Defensive choice; a pure function of catalog, vitals and the threat.
    #[must_use]
    pub fn pick_defense(
        &self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        incoming_damage: f64,
    ) -> Option<usize> {
        let eligible = eligible_defense(catalog, vitals);
        if eligible.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let moves = catalog.defensive();
        let health = vitals.tire_health();
        let strength = |i: usize| moves[i].damage_reduction();

        if let Some(reserve) = &cfg.reserve {
            if health <= reserve.critical_health || incoming_damage >= reserve.trigger_damage {
                let slot = catalog.defensive_index(&reserve.move_name);
                if let Some(i) = named(slot, &eligible) {
                    return Some(i);
                }
            }
        }

        if health <= incoming_damage {
            return arg_max(&eligible, strength);
        }

        if incoming_damage >= cfg.high_damage {
            let strong: Eligible = eligible
                .iter()
                .copied()
                .filter(|&i| strength(i) >= cfg.min_strength)
                .collect();
            return arg_max(&strong, strength).or(Some(eligible[0]));
        }

        let low_fuel = cfg.low_fuel_defense.is_some_and(|t| vitals.fuel() < t);
        let small_hit = cfg.low_damage.is_some_and(|t| incoming_damage <= t);
        if low_fuel || small_hit {
            return arg_max(&eligible, |i| -moves[i].fuel_cost());
        }

        arg_max(&eligible, |i| {
            let m = &moves[i];
            let reduction = m.damage_reduction() / cfg.reduction_norm;
            let conservation = (FUEL_SCALE - m.fuel_cost()) / FUEL_SCALE;
            (reduction + conservation) / 2.0
        })
    }
}

impl MovePolicy for HeuristicPolicy {
    fn choose_offensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        _rng: &mut RaceRng,
    ) -> Option<usize> {
        self.pick_offense(catalog, vitals)
    }

    fn choose_defensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        incoming_damage: f64,
        _rng: &mut RaceRng,
    ) -> Option<usize> {
        self.pick_defense(catalog, vitals, incoming_damage)
    }
}

/// `slot` if it is currently eligible.
fn named(slot: Option<usize>, eligible: &[usize]) -> Option<usize> {
    slot.filter(|i| eligible.contains(i))
}

/// Offensive index of an optional signature move.
fn signature(catalog: &MoveCatalog, name: Option<&str>) -> Option<usize> {
    name.and_then(|n| catalog.offensive_index(n))
}
