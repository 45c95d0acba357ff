//! Uniform choice among eligible moves.

use crate::core::RaceRng;
use crate::driver::Vitals;
use crate::moves::MoveCatalog;

use super::{eligible_defense, eligible_offense, MovePolicy};

/// Picks uniformly among whatever the driver can currently afford.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomEligible;

impl MovePolicy for RandomEligible {
    fn choose_offensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        rng.choose(&eligible_offense(catalog, vitals)).copied()
    }

    fn choose_defensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        _incoming_damage: f64,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        rng.choose(&eligible_defense(catalog, vitals)).copied()
    }
}
