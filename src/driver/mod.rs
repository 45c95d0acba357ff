//! Drivers: resource state, owned moves, and a move-selection policy.
//!
//! ## Vitals
//!
//! Tire health and fuel. Tire health is clamped at zero; only the combat
//! resolver and the moves themselves may debit fuel or apply damage.
//!
//! ## Driver
//!
//! A named participant that owns its catalog exclusively and delegates every
//! decision to its `Policy`, drawing randomness from its own `RaceRng`.
//!
//! ## Configuration
//!
//! `DriverConfig` is the serde/TOML description a driver is built from;
//! `roster` holds the two scripted drivers.

mod config;
mod participant;
pub mod roster;
mod vitals;

pub use config::{DriverConfig, RosterFile, DEFAULT_FUEL, DEFAULT_TIRE_HEALTH};
pub use participant::Driver;
pub use vitals::{Liveness, Vitals};
