//! Race-level rules.

use serde::{Deserialize, Serialize};

use crate::core::{Result, Seat};
use crate::driver::Liveness;

/// Default number of consecutive idle rounds that end a race.
pub const DEFAULT_STALEMATE_AFTER: u32 = 2;

/// Default safety cap on race length.
pub const DEFAULT_MAX_ROUNDS: u32 = 500;

/// Rules shared by both drivers in a race.
///
/// ```
/// use grid_duel::driver::Liveness;
/// use grid_duel::race::RaceConfig;
///
/// let config = RaceConfig::default()
///     .with_liveness(Liveness::TireAndFuel)
///     .with_stalemate_after(None);
/// assert_eq!(config.max_rounds, 500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Which resources keep a driver in the race.
    pub liveness: Liveness,
    /// Consecutive rounds without an attack before the race is called.
    /// `None` or `Some(0)` disables the rule.
    pub stalemate_after: Option<u32>,
    /// Rounds after which the race ends regardless of state.
    pub max_rounds: u32,
    /// Who attacks in round 1.
    pub first_attacker: Seat,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            liveness: Liveness::TireOnly,
            stalemate_after: Some(DEFAULT_STALEMATE_AFTER),
            max_rounds: DEFAULT_MAX_ROUNDS,
            first_attacker: Seat::First,
        }
    }
}

impl RaceConfig {
    #[must_use]
    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    /// `Some(0)` is stored as `None`.
    #[must_use]
    pub fn with_stalemate_after(mut self, rounds: Option<u32>) -> Self {
        self.stalemate_after = rounds.filter(|&n| n > 0);
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    #[must_use]
    pub fn with_first_attacker(mut self, seat: Seat) -> Self {
        self.first_attacker = seat;
        self
    }

    /// Idle rounds that end the race, if the rule is on.
    #[must_use]
    pub fn stalemate_limit(&self) -> Option<u32> {
        self.stalemate_after.filter(|&n| n > 0)
    }

    /// Parse a `[race]`-style TOML table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        let rounds = config.stalemate_after;
        Ok(config.with_stalemate_after(rounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RaceConfig::default();
        assert_eq!(config.liveness, Liveness::TireOnly);
        assert_eq!(config.stalemate_after, Some(2));
        assert_eq!(config.max_rounds, 500);
        assert_eq!(config.first_attacker, Seat::First);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RaceConfig::from_toml_str(
            r#"
            liveness = "tire_and_fuel"
            first_attacker = "Second"
            "#,
        )
        .unwrap();
        assert_eq!(config.liveness, Liveness::TireAndFuel);
        assert_eq!(config.first_attacker, Seat::Second);
        assert_eq!(config.stalemate_after, Some(2));
        assert_eq!(config.max_rounds, 500);
    }

    #[test]
    fn test_zero_stalemate_disables_rule() {
        let built = RaceConfig::default().with_stalemate_after(Some(0));
        assert_eq!(built.stalemate_after, None);

        let parsed = RaceConfig::from_toml_str("stalemate_after = 0").unwrap();
        assert_eq!(parsed.stalemate_after, None);

        let literal = RaceConfig {
            stalemate_after: Some(0),
            ..RaceConfig::default()
        };
        assert_eq!(literal.stalemate_limit(), None);
        assert_eq!(RaceConfig::default().stalemate_limit(), Some(2));
    }
}
