//! Fixed timestep simulation tick
//!
//! One call advances the engine by one step, strictly in this order:
//! spawn → advance entities → collisions → progression → buff expiry →
//! particles. Nothing runs unless the engine is `Active`.

use glam::Vec2;

use super::buffs::{self, BuffKind};
use super::collision;
use super::difficulty::gravity;
use super::particles::{EXHAUST_COLOR, IMPACT_COLOR, SHIELD_COLOR};
use super::spawner::BuffSpawn;
use super::state::{EnginePhase, GameEvent, GameState};
use crate::consts::SIM_STEP_MS;
use crate::sanitize;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement intent per axis in [-1, 1] (+y is down)
    pub move_axis: Vec2,
}

impl TickInput {
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            move_axis: Vec2::new(x, y),
        }
    }
}

/// Advance the engine by `dt_ms` and return what happened
///
/// Pass [`SIM_STEP_MS`] for the canonical fixed step. On game over the
/// engine emits [`GameEvent::GameOver`] and resets itself to `Idle`.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != EnginePhase::Active {
        return events;
    }

    let dt_ms = sanitize(dt_ms);
    let steps = dt_ms / SIM_STEP_MS;
    state.clock_ms += dt_ms as f64;
    state.time_ticks += 1;
    let now = state.clock_ms;
    let altitude = state.progression.altitude;

    state.player.apply_move(input.move_axis, steps, &state.field);

    // Spawn
    if let Some(origin) = state.hazard_spawner.maybe_spawn(
        now,
        altitude,
        &state.catalog,
        &state.field,
        &state.tuning,
        &mut state.rng,
        &mut state.hazards,
    ) {
        events.push(GameEvent::HazardSpawned { origin });
    }
    if let BuffSpawn::Spawned(kind) = state.buff_spawner.maybe_spawn(
        now,
        &state.field,
        &state.tuning,
        &mut state.rng,
        &mut state.pickups,
    ) {
        events.push(GameEvent::PickupSpawned(kind));
    }

    // Advance entities
    let slow_time = state.player.buffs.is_active(BuffKind::SlowTime);
    let g = gravity(altitude, slow_time, &state.tuning);
    for hazard in &mut state.hazards {
        hazard.advance(g, steps, state.tuning.hazard_speed_scale);
    }
    for pickup in &mut state.pickups {
        pickup.advance(steps, state.tuning.pickup_pulse_step);
    }

    // Collisions
    let report = collision::resolve(
        &mut state.player,
        &mut state.hazards,
        &mut state.pickups,
        &state.field,
        &state.tuning,
    );
    for hit in &report.hazard_hits {
        let color = if hit.shielded { SHIELD_COLOR } else { IMPACT_COLOR };
        let count = state.tuning.impact_burst;
        state.particles.burst(hit.pos, color, count, &state.tuning);
        events.push(GameEvent::HazardHit {
            shielded: hit.shielded,
        });
    }
    for &(kind, pos) in &report.collected {
        let count = state.tuning.pickup_burst;
        state.particles.burst(pos, kind.color(), count, &state.tuning);
        events.push(GameEvent::PickupCollected(kind));
    }

    // Progression, then expiry
    state.progression.advance(&mut state.player, &state.tuning);
    for kind in buffs::update_timers(&mut state.player, dt_ms) {
        events.push(GameEvent::BuffExpired(kind));
    }

    // Exhaust trails behind the craft
    let exhaust = state.player.pos + Vec2::new(0.0, state.player.half_size);
    let count = state.tuning.exhaust_per_tick;
    state.particles.emit(exhaust, EXHAUST_COLOR, count, &state.tuning);
    state.particles.update(&state.tuning);

    if !state.player.is_alive() {
        let score = state.player.score;
        let altitude = state.progression.altitude;
        log::info!("Game over: score {:.0}, altitude {:.0}", score, altitude);
        events.push(GameEvent::GameOver { score, altitude });
        state.reset();
    }

    events
}
