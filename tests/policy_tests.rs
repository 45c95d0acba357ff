//! Move-selection policy integration tests.

use grid_duel::core::{DuelError, RaceRng};
use grid_duel::driver::{roster, DriverConfig, Vitals};
use grid_duel::moves::{MoveCatalog, OffensiveMove};
use grid_duel::policy::interactive::{InputFailure, InputResolution};
use grid_duel::policy::{
    HeuristicConfig, InteractiveConfig, InteractivePolicy, MovePolicy, PolicyConfig, PolicyKind,
    ScriptedSource, SilentSource,
};

fn mostafa_catalog() -> MoveCatalog {
    let config = roster::mostafa(0);
    let mut catalog = MoveCatalog::new();
    for mv in &config.offensive {
        catalog.add_offensive(mv.clone()).unwrap();
    }
    for mv in &config.defensive {
        catalog.add_defensive(mv.clone()).unwrap();
    }
    catalog
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_heuristic_ignores_seed() {
    for fuel in [500.0, 300.0, 200.0, 100.0, 40.0] {
        let mut a = roster::verstappen(1).with_fuel(fuel).build().unwrap();
        let mut b = roster::verstappen(999).with_fuel(fuel).build().unwrap();

        let pick_a = a.choose_offensive_move().map(|m| m.name().to_string());
        let pick_b = b.choose_offensive_move().map(|m| m.name().to_string());
        assert_eq!(pick_a, pick_b, "fuel {fuel}");

        let again = a.choose_offensive_move().map(|m| m.name().to_string());
        assert_eq!(pick_a, again);
    }
}

#[test]
fn test_mostafa_saves_block_for_big_hits() {
    let mut hassan = roster::mostafa(5).build().unwrap();

    let small = hassan.choose_defensive_move(7.0).map(|m| m.name().to_string());
    assert_eq!(small.as_deref(), Some("Slipstream Cut"));

    let big = hassan.choose_defensive_move(22.0).map(|m| m.name().to_string());
    assert_eq!(big.as_deref(), Some("Aggressive Block"));
}

#[test]
fn test_heuristic_rejects_foreign_move_names() {
    let err = roster::verstappen(1)
        .with_policy(PolicyConfig::Heuristic(HeuristicConfig::mostafa()))
        .build()
        .unwrap_err();
    assert!(matches!(err, DuelError::UnknownMove { .. }));
}

// =============================================================================
// Random
// =============================================================================

#[test]
fn test_random_is_seed_deterministic() {
    let picks = |seed: u64| {
        let mut driver = roster::verstappen(seed)
            .with_policy(PolicyConfig::Random)
            .build()
            .unwrap();
        (0..20)
            .map(|_| driver.choose_offensive_move().map(|m| m.name().to_string()))
            .collect::<Vec<_>>()
    };

    assert_eq!(picks(11), picks(11));
}

#[test]
fn test_random_only_picks_affordable() {
    let mut driver = roster::verstappen(3)
        .with_fuel(40.0)
        .with_policy(PolicyConfig::Random)
        .build()
        .unwrap();
    assert_eq!(driver.policy_kind(), PolicyKind::Random);

    for _ in 0..20 {
        let pick = driver.choose_offensive_move().map(|m| m.name().to_string());
        assert_eq!(pick.as_deref(), Some("Precision Turn"));
    }
    assert!(driver.choose_defensive_move(10.0).is_some());
}

#[test]
fn test_random_with_nothing_affordable() {
    let mut driver = DriverConfig::new("Dry")
        .with_fuel(1.0)
        .with_offensive(OffensiveMove::new("Lunge", 30.0, 6.0, ""))
        .build()
        .unwrap();
    assert!(driver.choose_offensive_move().is_none());
    assert!(driver.choose_defensive_move(5.0).is_none());
}

// =============================================================================
// Interactive
// =============================================================================

#[test]
fn test_voice_driver_follows_commands() {
    let source = ScriptedSource::new(["Mercedes charge now!", "SLIPSTREAM"]);
    let mut hassan = roster::mostafa_voice(2)
        .build_with_source(Box::new(source))
        .unwrap();
    assert_eq!(hassan.policy_kind(), PolicyKind::Interactive);

    let attack = hassan.choose_offensive_move().map(|m| m.name().to_string());
    assert_eq!(attack.as_deref(), Some("Mercedes Charge"));

    let defense = hassan.choose_defensive_move(12.0).map(|m| m.name().to_string());
    assert_eq!(defense.as_deref(), Some("Slipstream Cut"));
}

#[test]
fn test_interactive_retries_then_recognizes() {
    let catalog = mostafa_catalog();
    let vitals = Vitals::new(100.0, 500.0);
    let mut rng = RaceRng::new(0);
    let source = ScriptedSource::from_responses(vec![
        None,
        Some("box box".into()),
        Some("take the corner".into()),
    ]);
    let mut policy = InteractivePolicy::new(InteractiveConfig::default(), Box::new(source));

    let pick = policy.choose_offensive(&catalog, &vitals, &mut rng);

    assert_eq!(pick, catalog.offensive_index("Corner Mastery"));
    assert_eq!(
        policy.last_resolution(),
        Some(&InputResolution::Recognized {
            attempt: 3,
            move_name: "Corner Mastery".into(),
        })
    );
}

#[test]
fn test_interactive_unavailable_move_consumes_attempt() {
    let catalog = mostafa_catalog();
    // Enough for Corner Mastery only.
    let vitals = Vitals::new(100.0, 30.0);
    let mut rng = RaceRng::new(0);
    let source = ScriptedSource::new(["mercedes", "corner"]);
    let mut policy = InteractivePolicy::new(InteractiveConfig::default(), Box::new(source));

    let pick = policy.choose_offensive(&catalog, &vitals, &mut rng);

    assert_eq!(pick, catalog.offensive_index("Corner Mastery"));
    assert!(matches!(
        policy.last_resolution(),
        Some(InputResolution::Recognized { attempt: 2, .. })
    ));
}

#[test]
fn test_interactive_falls_back_to_random() {
    let catalog = mostafa_catalog();
    let vitals = Vitals::new(100.0, 500.0);
    let mut rng = RaceRng::new(9);
    let mut policy = InteractivePolicy::new(InteractiveConfig::default(), Box::new(SilentSource));

    let pick = policy.choose_defensive(&catalog, &vitals, 10.0, &mut rng);

    assert!(pick.is_some());
    assert_eq!(
        policy.last_resolution(),
        Some(&InputResolution::Fallback {
            failures: vec![InputFailure::Timeout; 3],
        })
    );
}
