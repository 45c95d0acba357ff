//! Error taxonomy.
//!
//! Only construction and I/O problems are errors. Running out of fuel, having
//! no eligible move, or losing the external command source are ordinary turn
//! outcomes and never surface here.

use thiserror::Error;

/// Errors raised while building drivers or loading/saving race data.
#[derive(Debug, Error)]
pub enum DuelError {
    /// Initial tire health must be strictly positive.
    #[error("driver {driver}: initial tire health must be positive, got {value}")]
    InvalidTireHealth { driver: String, value: f64 },

    /// Initial fuel must be strictly positive.
    #[error("driver {driver}: initial fuel must be positive, got {value}")]
    InvalidFuel { driver: String, value: f64 },

    /// Damage reduction outside `[0, 1]`.
    #[error("move {name}: damage reduction must be within [0, 1], got {value}")]
    InvalidReduction { name: String, value: f64 },

    /// A use limit of zero would make the move dead on arrival.
    #[error("move {name}: max uses must be positive")]
    InvalidMaxUses { name: String },

    /// Negative or non-finite costs and impacts.
    #[error("move {name}: {field} must be a non-negative number, got {value}")]
    InvalidMagnitude {
        name: String,
        field: &'static str,
        value: f64,
    },

    /// Move names are identifiers within a catalog.
    #[error("duplicate move name: {0}")]
    DuplicateMove(String),

    /// A policy or keyword table references a move the driver doesn't own.
    #[error("driver {driver} has no move named {name}")]
    UnknownMove { driver: String, name: String },

    /// A roster lookup found no driver with this name.
    #[error("no driver named {0} in roster")]
    UnknownDriver(String),

    /// TOML roster parsing failed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Binary record encoding failed.
    #[error("record encoding error: {0}")]
    Record(#[from] bincode::Error),

    /// JSON record encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
