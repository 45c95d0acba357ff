//! Move-selection policies.
//!
//! A policy looks at a driver's catalog and vitals and returns the index of
//! the move to play, or `None` when nothing is eligible:
//! - `RandomEligible`: uniform choice among affordable moves
//! - `HeuristicPolicy`: fuel-tier and threat-based scoring, fully deterministic
//! - `InteractivePolicy`: asks an external `CommandSource`, falling back to
//!   random selection
//!
//! `Policy` is the closed set a driver is built with.

pub mod heuristic;
pub mod interactive;
pub mod random;

pub use heuristic::{HeuristicConfig, HeuristicPolicy, ReserveDefense};
pub use interactive::{
    CommandSource, InputFailure, InputResolution, InteractiveConfig, InteractivePolicy,
    KeywordEntry, KeywordMap, ScriptedSource, SilentSource,
};
pub use random::RandomEligible;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{RaceRng, Result};
use crate::driver::Vitals;
use crate::moves::MoveCatalog;

/// Indices into a catalog list.
pub type Eligible = SmallVec<[usize; 4]>;

/// Selects moves for one driver.
pub trait MovePolicy {
    /// Pick an offensive move index, or `None` if nothing is affordable.
    fn choose_offensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        rng: &mut RaceRng,
    ) -> Option<usize>;

    /// Pick a defensive move index against `incoming_damage`, or `None`.
    fn choose_defensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        incoming_damage: f64,
        rng: &mut RaceRng,
    ) -> Option<usize>;
}

/// Offensive moves the driver can currently pay for, in catalog order.
#[must_use]
pub fn eligible_offense(catalog: &MoveCatalog, vitals: &Vitals) -> Eligible {
    catalog
        .offensive()
        .iter()
        .enumerate()
        .filter(|(_, m)| vitals.can_afford(m.fuel_cost()))
        .map(|(i, _)| i)
        .collect()
}

/// Defensive moves that are affordable and still have uses, in catalog order.
#[must_use]
pub fn eligible_defense(catalog: &MoveCatalog, vitals: &Vitals) -> Eligible {
    catalog
        .defensive()
        .iter()
        .enumerate()
        .filter(|(_, m)| vitals.can_afford(m.fuel_cost()) && m.has_uses())
        .map(|(i, _)| i)
        .collect()
}

/// Index of the candidate with the highest score.
///
/// Starts from the first candidate and only replaces on a strictly greater
/// score, so ties keep catalog order.
pub(crate) fn arg_max(candidates: &[usize], mut score: impl FnMut(usize) -> f64) -> Option<usize> {
    let (&first, rest) = candidates.split_first()?;
    let mut best = first;
    let mut best_score = score(first);
    for &i in rest {
        let s = score(i);
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    Some(best)
}

/// Which policy a driver runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Random,
    Heuristic,
    Interactive,
}

/// The policy set a driver can be built with.
#[derive(Debug)]
pub enum Policy {
    RandomEligible(RandomEligible),
    Heuristic(HeuristicPolicy),
    Interactive(InteractivePolicy),
}

impl Policy {
    /// Build a policy from config, checking every named move exists in `catalog`.
    ///
    /// `source` feeds the interactive policy and is ignored otherwise.
    pub fn from_config(
        config: &PolicyConfig,
        driver: &str,
        catalog: &MoveCatalog,
        source: Box<dyn CommandSource>,
    ) -> Result<Self> {
        Ok(match config {
            PolicyConfig::Random => Policy::RandomEligible(RandomEligible),
            PolicyConfig::Heuristic(cfg) => {
                cfg.check_moves(driver, catalog)?;
                Policy::Heuristic(HeuristicPolicy::new(cfg.clone()))
            }
            PolicyConfig::Interactive(cfg) => {
                cfg.check_moves(driver, catalog)?;
                Policy::Interactive(InteractivePolicy::new(cfg.clone(), source))
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::RandomEligible(_) => PolicyKind::Random,
            Policy::Heuristic(_) => PolicyKind::Heuristic,
            Policy::Interactive(_) => PolicyKind::Interactive,
        }
    }

    /// Hand over how the last external command was resolved, if any.
    pub fn take_input(&mut self) -> Option<InputResolution> {
        match self {
            Policy::Interactive(p) => p.take_resolution(),
            Policy::RandomEligible(_) | Policy::Heuristic(_) => None,
        }
    }
}

impl MovePolicy for Policy {
    fn choose_offensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        match self {
            Policy::RandomEligible(p) => p.choose_offensive(catalog, vitals, rng),
            Policy::Heuristic(p) => p.choose_offensive(catalog, vitals, rng),
            Policy::Interactive(p) => p.choose_offensive(catalog, vitals, rng),
        }
    }

    fn choose_defensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        incoming_damage: f64,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        match self {
            Policy::RandomEligible(p) => p.choose_defensive(catalog, vitals, incoming_damage, rng),
            Policy::Heuristic(p) => p.choose_defensive(catalog, vitals, incoming_damage, rng),
            Policy::Interactive(p) => p.choose_defensive(catalog, vitals, incoming_damage, rng),
        }
    }
}

/// Serializable policy selection for driver configs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    #[default]
    Random,
    Heuristic(HeuristicConfig),
    Interactive(InteractiveConfig),
}

impl PolicyConfig {
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            PolicyConfig::Random => PolicyKind::Random,
            PolicyConfig::Heuristic(_) => PolicyKind::Heuristic,
            PolicyConfig::Interactive(_) => PolicyKind::Interactive,
        }
    }
}
