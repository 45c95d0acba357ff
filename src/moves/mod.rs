//! Move definitions and the per-driver move catalog.
//!
//! Moves are immutable data plus an `execute` contract:
//! - `OffensiveMove` spends fuel and damages the opponent's tires
//! - `DefensiveMove` spends fuel and scales incoming damage down,
//!   optionally a limited number of times
//!
//! Execution never fails with an error. A move the actor cannot afford is
//! refused with a typed outcome and nothing is mutated.

pub mod catalog;
pub mod defensive;
pub mod offensive;

pub use catalog::{MoveCatalog, MoveRef};
pub use defensive::{DefenseNote, DefenseOutcome, DefensiveMove};
pub use offensive::{OffenseOutcome, OffensiveMove};

use crate::core::{DuelError, Result};

/// Reject negative, NaN or infinite magnitudes.
pub(crate) fn check_magnitude(name: &str, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DuelError::InvalidMagnitude {
            name: name.to_string(),
            field,
            value,
        })
    }
}
