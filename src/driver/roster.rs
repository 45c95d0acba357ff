//! The two scripted drivers.
//!
//! Both default to their heuristic strategy; swap the policy with
//! `DriverConfig::with_policy` for the random or voice-controlled variants.

use crate::moves::{DefensiveMove, OffensiveMove};
use crate::policy::{HeuristicConfig, InteractiveConfig, PolicyConfig};

use super::DriverConfig;

pub const VERSTAPPEN: &str = "Max Verstappen";
pub const MOSTAFA: &str = "Hassan Mostafa";

/// Max Verstappen: Red Bull moves, aggressive-then-efficient heuristic.
#[must_use]
pub fn verstappen(seed: u64) -> DriverConfig {
    DriverConfig::new(VERSTAPPEN)
        .with_offensive(OffensiveMove::new(
            "DRS Boost",
            45.0,
            12.0,
            "Drag Reduction System; temporarily increases straight-line speed.",
        ))
        .with_offensive(OffensiveMove::new(
            "Red Bull Surge",
            80.0,
            20.0,
            "Aggressive acceleration, high tire wear.",
        ))
        .with_offensive(OffensiveMove::new(
            "Precision Turn",
            30.0,
            8.0,
            "Tactical turn to gain time with minimal fuel use.",
        ))
        .with_defensive(DefensiveMove::new(
            "Brake Late",
            25.0,
            0.30,
            "Uses ultra-late braking to reduce attack impact. Common but risky.",
        ))
        .with_defensive(
            DefensiveMove::new(
                "ERS Deployment",
                40.0,
                0.50,
                "Deploys electric recovery system defensively to absorb incoming pressure.",
            )
            .with_max_uses(3),
        )
        .with_policy(PolicyConfig::Heuristic(HeuristicConfig::verstappen()))
        .with_seed(seed)
}

/// Hassan Mostafa: Mercedes moves, signature-move heuristic with a saved block.
#[must_use]
pub fn mostafa(seed: u64) -> DriverConfig {
    DriverConfig::new(MOSTAFA)
        .with_offensive(OffensiveMove::new("Turbo Start", 50.0, 10.0, "Early burst of speed."))
        .with_offensive(OffensiveMove::new("Mercedes Charge", 90.0, 22.0, "Full-throttle attack."))
        .with_offensive(OffensiveMove::new(
            "Corner Mastery",
            25.0,
            7.0,
            "Skilled turning for efficiency.",
        ))
        .with_defensive(DefensiveMove::new(
            "Slipstream Cut",
            20.0,
            0.40,
            "Cuts into airflow behind the leading car to limit the opponent's advantage.",
        ))
        .with_defensive(
            DefensiveMove::new(
                "Aggressive Block",
                35.0,
                1.00,
                "Swerves to block a single incoming move. Only usable twice.",
            )
            .with_max_uses(2),
        )
        .with_policy(PolicyConfig::Heuristic(HeuristicConfig::mostafa()))
        .with_seed(seed)
}

/// Mostafa driven by voice commands with his keyword tables.
#[must_use]
pub fn mostafa_voice(seed: u64) -> DriverConfig {
    mostafa(seed).with_policy(PolicyConfig::Interactive(InteractiveConfig::default()))
}

/// Every preset, in grid order.
#[must_use]
pub fn presets(seed: u64) -> Vec<DriverConfig> {
    vec![verstappen(seed), mostafa(seed.wrapping_add(1))]
}
