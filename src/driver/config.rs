//! Serializable driver descriptions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, RaceRng, Result};
use crate::moves::{DefensiveMove, MoveCatalog, OffensiveMove};
use crate::policy::{CommandSource, Policy, PolicyConfig, SilentSource};

use super::Driver;

pub const DEFAULT_TIRE_HEALTH: f64 = 100.0;
pub const DEFAULT_FUEL: f64 = 500.0;

fn default_tire_health() -> f64 {
    DEFAULT_TIRE_HEALTH
}

fn default_fuel() -> f64 {
    DEFAULT_FUEL
}

/// Everything needed to build a fresh `Driver`.
///
/// ## Example
///
/// ```
/// use grid_duel::driver::DriverConfig;
/// use grid_duel::moves::OffensiveMove;
///
/// let driver = DriverConfig::new("Test Driver")
///     .with_fuel(120.0)
///     .with_offensive(OffensiveMove::new("Lunge", 30.0, 6.0, "Late dive."))
///     .with_seed(9)
///     .build()?;
///
/// assert_eq!(driver.fuel(), 120.0);
/// assert_eq!(driver.tire_health(), 100.0);
/// # Ok::<(), grid_duel::core::DuelError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub name: String,
    #[serde(default = "default_tire_health")]
    pub tire_health: f64,
    #[serde(default = "default_fuel")]
    pub fuel: f64,
    #[serde(default)]
    pub offensive: Vec<OffensiveMove>,
    #[serde(default)]
    pub defensive: Vec<DefensiveMove>,
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Seed for the driver's own RNG.
    #[serde(default)]
    pub seed: u64,
}

impl DriverConfig {
    /// Config with default resources, no moves and the random policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tire_health: DEFAULT_TIRE_HEALTH,
            fuel: DEFAULT_FUEL,
            offensive: Vec::new(),
            defensive: Vec::new(),
            policy: PolicyConfig::default(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_tire_health(mut self, tire_health: f64) -> Self {
        self.tire_health = tire_health;
        self
    }

    #[must_use]
    pub fn with_fuel(mut self, fuel: f64) -> Self {
        self.fuel = fuel;
        self
    }

    #[must_use]
    pub fn with_offensive(mut self, mv: OffensiveMove) -> Self {
        self.offensive.push(mv);
        self
    }

    #[must_use]
    pub fn with_defensive(mut self, mv: DefensiveMove) -> Self {
        self.defensive.push(mv);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build a driver. An interactive policy gets a `SilentSource`.
    pub fn build(&self) -> Result<Driver> {
        self.build_with_source(Box::new(SilentSource))
    }

    /// Build a driver whose interactive policy listens to `source`.
    pub fn build_with_source(&self, source: Box<dyn CommandSource>) -> Result<Driver> {
        let mut catalog = MoveCatalog::new();
        for mv in &self.offensive {
            catalog.add_offensive(mv.clone())?;
        }
        for mv in &self.defensive {
            catalog.add_defensive(mv.clone())?;
        }

        let policy = Policy::from_config(&self.policy, &self.name, &catalog, source)?;
        Driver::new(
            self.name.clone(),
            self.tire_health,
            self.fuel,
            catalog,
            policy,
            RaceRng::new(self.seed),
        )
    }
}

/// A set of driver configs loaded from TOML.
///
/// ```toml
/// [[drivers]]
/// name = "Max Verstappen"
/// fuel = 500.0
///
/// [[drivers.offensive]]
/// name = "DRS Boost"
/// fuel_cost = 45.0
/// impact = 12.0
///
/// [drivers.policy]
/// kind = "heuristic"
/// high_fuel = 300.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub drivers: Vec<DriverConfig>,
}

impl RosterFile {
    /// Parse a roster from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a roster file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Find a driver by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DriverConfig> {
        self.drivers.iter().find(|d| d.name == name)
    }

    /// Like [`get`](Self::get), but a missing driver is an error.
    pub fn require(&self, name: &str) -> Result<&DriverConfig> {
        self.get(name)
            .ok_or_else(|| DuelError::UnknownDriver(name.to_string()))
    }
}
