//! # grid-duel
//!
//! A turn-based racing combat engine between two scripted drivers.
//!
//! Each driver has tire health, fuel and a catalog of offensive and
//! defensive moves. Every round the attacker's policy picks an offensive
//! move, the defender's policy picks a response, damage is mitigated and
//! applied, and the roles swap. The race ends when a driver drops out,
//! when nobody can attack for a configured number of rounds, or at a
//! round cap.
//!
//! ## Design Principles
//!
//! 1. **Data-driven drivers**: thresholds, move catalogs and policy choice
//!    are configuration (`DriverConfig`, `HeuristicConfig`), not code.
//!
//! 2. **Deterministic**: every random choice draws from a seeded
//!    `RaceRng` owned by the driver that makes it.
//!
//! 3. **Events as data**: the race reports `DuelEvent` values to an
//!    `EventSink`; the engine never formats console output itself.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, errors
//! - `moves`: offensive/defensive moves and the per-driver catalog
//! - `driver`: vitals, drivers, configuration and the roster
//! - `policy`: random, heuristic and interactive move selection
//! - `combat`: single-turn resolution
//! - `race`: the race state machine, events and records

pub mod combat;
pub mod core;
pub mod driver;
pub mod moves;
pub mod policy;
pub mod race;

// Re-export commonly used types
pub use crate::core::{DuelError, RaceRng, Result, Seat, SeatMap};

pub use crate::moves::{
    DefenseNote, DefenseOutcome, DefensiveMove, MoveCatalog, MoveRef, OffenseOutcome,
    OffensiveMove,
};

pub use crate::driver::{Driver, DriverConfig, Liveness, RosterFile, Vitals};

pub use crate::policy::{
    CommandSource, HeuristicConfig, HeuristicPolicy, InteractiveConfig, InteractivePolicy,
    KeywordMap, MovePolicy, Policy, PolicyConfig, PolicyKind, RandomEligible, ScriptedSource,
    SilentSource,
};

pub use crate::combat::{CombatResolver, Exchange, IdleReason, TurnAction, TurnReport};

pub use crate::race::{
    DuelEvent, EndReason, EventSink, NullSink, Race, RaceConfig, RaceOutcome, RaceRecord,
    RaceResult, RaceStatus, RoundRecord, TracingSink,
};
