//! Per-driver move catalog.
//!
//! Keeps offensive and defensive moves in insertion order (policies break
//! ties by that order) and indexes every name for keyword and signature-move
//! lookup. Names are unique across both lists.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{DefensiveMove, OffensiveMove};
use crate::core::{DuelError, Result};

/// Position of a move inside a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRef {
    Offensive(usize),
    Defensive(usize),
}

/// Ordered, name-unique collection of a driver's moves.
///
/// ## Example
///
/// ```
/// use grid_duel::moves::{DefensiveMove, MoveCatalog, MoveRef, OffensiveMove};
///
/// let mut catalog = MoveCatalog::new();
/// catalog.add_offensive(OffensiveMove::new("Turbo Start", 50.0, 10.0, "Early burst."))?;
/// catalog.add_defensive(DefensiveMove::new("Slipstream Cut", 20.0, 0.4, "Cuts airflow."))?;
///
/// assert_eq!(catalog.find("Slipstream Cut"), Some(MoveRef::Defensive(0)));
/// assert!(catalog.add_offensive(OffensiveMove::new("Turbo Start", 1.0, 1.0, "")).is_err());
/// # Ok::<(), grid_duel::core::DuelError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MoveCatalog {
    offensive: SmallVec<[OffensiveMove; 4]>,
    defensive: SmallVec<[DefensiveMove; 4]>,
    by_name: FxHashMap<String, MoveRef>,
}

impl MoveCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an offensive move after validating it.
    pub fn add_offensive(&mut self, mv: OffensiveMove) -> Result<MoveRef> {
        mv.validate()?;
        let slot = MoveRef::Offensive(self.offensive.len());
        self.claim_name(mv.name(), slot)?;
        self.offensive.push(mv);
        Ok(slot)
    }

    /// Append a defensive move after validating it. Its use counter starts full.
    pub fn add_defensive(&mut self, mut mv: DefensiveMove) -> Result<MoveRef> {
        mv.validate()?;
        let slot = MoveRef::Defensive(self.defensive.len());
        self.claim_name(mv.name(), slot)?;
        mv.rearm();
        self.defensive.push(mv);
        Ok(slot)
    }

    fn claim_name(&mut self, name: &str, slot: MoveRef) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(DuelError::DuplicateMove(name.to_string()));
        }
        self.by_name.insert(name.to_string(), slot);
        Ok(())
    }

    /// Offensive moves in catalog order.
    #[must_use]
    pub fn offensive(&self) -> &[OffensiveMove] {
        &self.offensive
    }

    /// Defensive moves in catalog order.
    #[must_use]
    pub fn defensive(&self) -> &[DefensiveMove] {
        &self.defensive
    }

    pub(crate) fn defensive_mut(&mut self, index: usize) -> &mut DefensiveMove {
        &mut self.defensive[index]
    }

    /// Locate a move by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<MoveRef> {
        self.by_name.get(name).copied()
    }

    /// Index of an offensive move by name.
    #[must_use]
    pub fn offensive_index(&self, name: &str) -> Option<usize> {
        match self.find(name)? {
            MoveRef::Offensive(i) => Some(i),
            MoveRef::Defensive(_) => None,
        }
    }

    /// Index of a defensive move by name.
    #[must_use]
    pub fn defensive_index(&self, name: &str) -> Option<usize> {
        match self.find(name)? {
            MoveRef::Defensive(i) => Some(i),
            MoveRef::Offensive(_) => None,
        }
    }

    /// Cheapest offensive move cost, if any.
    #[must_use]
    pub fn cheapest_offense(&self) -> Option<f64> {
        self.offensive.iter().map(OffensiveMove::fuel_cost).reduce(f64::min)
    }

    /// Total number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offensive.len() + self.defensive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
