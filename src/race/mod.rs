//! Races between two drivers.
//!
//! A [`Race`] owns both drivers, alternates attacker and defender every
//! round and stops when a driver drops out, when nobody can attack for
//! [`RaceConfig::stalemate_after`] rounds in a row, or at the round cap.
//!
//! ```
//! use grid_duel::driver::roster;
//! use grid_duel::race::{Race, RaceConfig};
//!
//! let mut events = Vec::new();
//! let first = roster::verstappen(7).build()?;
//! let second = roster::mostafa(8).build()?;
//! let mut race = Race::new(first, second, RaceConfig::default());
//! let outcome = race.run(&mut events);
//!
//! assert_eq!(outcome.rounds, race.round_number());
//! assert_eq!(race.history().len() as u32, outcome.rounds);
//! # Ok::<(), grid_duel::DuelError>(())
//! ```

mod config;
mod controller;
mod event;
mod outcome;
mod record;

pub use config::{RaceConfig, DEFAULT_MAX_ROUNDS, DEFAULT_STALEMATE_AFTER};
pub use controller::{Race, RaceStatus};
pub use event::{DuelEvent, EventSink, NullSink, TracingSink};
pub use outcome::{EndReason, RaceOutcome, RaceResult};
pub use record::{RaceRecord, RoundRecord};
