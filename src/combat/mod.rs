//! Single-exchange combat resolution.
//!
//! `CombatResolver::resolve_turn` runs one attacker-acts / defender-responds
//! exchange and returns a `TurnReport` describing it as data.

pub mod report;
pub mod resolver;

pub use report::{Exchange, IdleReason, TurnAction, TurnReport};
pub use resolver::CombatResolver;
