//! Whole-session checks through the public API

use astro_runner::consts::SIM_STEP_MS;
use astro_runner::sim::{
    BuffKind, Catalog, EnginePhase, GameEvent, GameState, HazardOrigin, PlayField, TickInput,
    buffs, tick,
};
use astro_runner::{Settings, Tuning};

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.start();
    state
}

#[test]
fn hazard_free_ticks_accumulate_score_and_altitude() {
    let mut state = started(1);
    for _ in 0..100 {
        tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    }
    assert_eq!(state.player.lives, 3);
    assert!((state.player.score - 5.0).abs() < 1e-4);
    assert!((state.altitude() - 5.0).abs() < 1e-4);
}

#[test]
fn catalog_feed_drives_hazard_origin() {
    let feed = r#"{
        "near_earth_objects": {
            "2025-03-01": [
                { "name": "(2025 EA)", "estimated_diameter": { "kilometers": { "estimated_diameter_max": 0.12 } } },
                { "name": "(2025 EB)" }
            ]
        }
    }"#;
    let catalog = Catalog::from_feed_json(feed).unwrap();
    let mut state = started(2).with_catalog(catalog);

    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    }
    assert!(!state.hazards.is_empty());
    assert!(state.hazards.iter().all(|h| h.origin == HazardOrigin::Catalog));
    assert!(
        state
            .hazards
            .iter()
            .all(|h| h.name.as_deref().is_some_and(|n| n.starts_with("(2025 E")))
    );
}

#[test]
fn empty_catalog_spawns_synthetic_hazards() {
    let mut state = started(3);
    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    }
    assert!(!state.hazards.is_empty());
    assert!(state.hazards.iter().all(|h| h.origin == HazardOrigin::Synthetic));
}

#[test]
fn idle_player_eventually_loses_and_engine_resets() {
    // A stationary craft in the middle of the field gets hit sooner or later
    let mut state = started(4);
    let mut game_over = None;
    let mut unshielded_hits = 0;

    for _ in 0..200_000 {
        for event in tick(&mut state, &TickInput::default(), SIM_STEP_MS) {
            match event {
                GameEvent::HazardHit { shielded: false } => unshielded_hits += 1,
                GameEvent::GameOver { score, altitude } => game_over = Some((score, altitude)),
                _ => {}
            }
        }
        if state.phase == EnginePhase::Idle {
            break;
        }
    }

    let (score, altitude) = game_over.expect("session should end");
    assert_eq!(unshielded_hits, 3);
    assert!(score >= 0.0 && altitude > 0.0);
    assert_eq!(state.player.lives, 3);
    assert!(state.hazards.is_empty() && state.pickups.is_empty());
    assert_eq!(state.altitude(), 0.0);

    // The controller can start a fresh session on the same engine
    state.start();
    tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    assert!((state.player.score - 0.05).abs() < 1e-6);
}

#[test]
fn boost_invariant_holds_across_a_session() {
    let mut state = started(5);
    buffs::activate(&mut state.player, BuffKind::Boost, &state.tuning);

    for _ in 0..2_000 {
        tick(&mut state, &TickInput::moving(1.0, 0.0), SIM_STEP_MS);
        let boosted = state.player.buffs.is_active(BuffKind::Boost);
        let expected = if boosted {
            state.player.base_speed * state.tuning.boost_factor
        } else {
            state.player.base_speed
        };
        assert_eq!(state.player.speed, expected);
        for (_, status) in state.player.buffs.iter() {
            assert!(status.remaining_ms <= 0.0 || status.active);
        }
    }
}

#[test]
fn disabled_particles_do_not_change_gameplay() {
    let tuning = Tuning::default();
    let with = Settings::new();
    let without = Settings {
        particles: false,
        ..Settings::new()
    };

    let mut a = GameState::with_config(77, PlayField::default(), tuning.clone(), &with);
    let mut b = GameState::with_config(77, PlayField::default(), tuning, &without);
    a.start();
    b.start();

    for i in 0..3_000 {
        let input = TickInput::moving(((i / 120) % 3) as f32 - 1.0, 0.0);
        assert_eq!(tick(&mut a, &input, SIM_STEP_MS), tick(&mut b, &input, SIM_STEP_MS));
    }
    assert_eq!(a.hazards, b.hazards);
    assert!(b.particles.is_empty());
}

#[test]
fn snapshot_serializes_for_render_sinks() {
    let mut state = started(6);
    for _ in 0..400 {
        tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    }
    let json = serde_json::to_value(state.snapshot()).unwrap();
    assert_eq!(json["phase"], serde_json::to_value(state.phase).unwrap());
    assert_eq!(json["hazards"].as_array().map(Vec::len), Some(state.hazards.len()));
    assert!(json["player"]["buffs"].is_object());
}

#[test]
fn tuning_file_overrides_reach_the_simulation() {
    let tuning = Tuning::from_json(r#"{ "base_gain": 0.5 }"#).unwrap();
    let mut state = GameState::with_config(8, PlayField::default(), tuning, &Settings::new());
    state.start();
    for _ in 0..10 {
        tick(&mut state, &TickInput::default(), SIM_STEP_MS);
    }
    assert!((state.player.score - 5.0).abs() < 1e-4);
}
