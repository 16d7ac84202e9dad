//! Time-gated hazard and pickup spawners
//!
//! Both spawners share the same deterministic cadence gate: a spawn event
//! fires when strictly more than the current interval has elapsed since the
//! last one. Only the choice made inside an event is random.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::buffs::BuffKind;
use super::catalog::{Catalog, hazard_from_record};
use super::difficulty::hazard_spawn_interval;
use super::state::{Hazard, HazardOrigin, Pickup, PlayField};
use crate::tuning::Tuning;
use crate::{sanitize, sanitize_f64};

/// Elapsed-time spawn gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnGate {
    pub last_spawn_ms: f64,
    pub interval_ms: f32,
}

impl SpawnGate {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            last_spawn_ms: 0.0,
            interval_ms: sanitize(interval_ms),
        }
    }

    /// Fire if `now - last > interval`, recording `now` as the new last spawn
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        let now_ms = sanitize_f64(now_ms);
        if now_ms - self.last_spawn_ms > self.interval_ms as f64 {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, interval_ms: f32) {
        *self = Self::new(interval_ms);
    }
}

/// Spawns hazards at an altitude-dependent cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSpawner {
    gate: SpawnGate,
}

impl HazardSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gate: SpawnGate::new(tuning.hazard_interval_ms),
        }
    }

    /// Current spawn gate (ms)
    pub fn current_interval(&self) -> f32 {
        self.gate.interval_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.gate.last_spawn_ms
    }

    /// Spawn one hazard into `hazards` if the gate allows it
    ///
    /// Prefers a uniformly chosen catalog record whenever the catalog is
    /// non-empty and falls back to a synthetic hazard otherwise. The gate
    /// interval is recomputed from `altitude` after every spawn.
    #[allow(clippy::too_many_arguments)]
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now_ms: f64,
        altitude: f32,
        catalog: &Catalog,
        field: &PlayField,
        tuning: &Tuning,
        rng: &mut R,
        hazards: &mut Vec<Hazard>,
    ) -> Option<HazardOrigin> {
        if !self.gate.try_fire(now_ms) {
            return None;
        }

        let record = catalog.choose(rng);
        let hazard = hazard_from_record(record, field, tuning, rng);
        let origin = hazard.origin;
        log::trace!(
            "Hazard spawned ({:?}, magnitude {:.1}, size {:.1})",
            origin,
            hazard.magnitude,
            hazard.size
        );
        hazards.push(hazard);

        self.gate.interval_ms = hazard_spawn_interval(altitude, tuning);
        Some(origin)
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        self.gate.reset(tuning.hazard_interval_ms);
    }
}

/// Spawns pickups on a fixed cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffSpawner {
    gate: SpawnGate,
}

/// Result of a buff spawner call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffSpawn {
    /// Gate still closed
    Waiting,
    /// Gate fired but the roll landed outside every band
    Skipped,
    Spawned(BuffKind),
}

impl BuffSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gate: SpawnGate::new(tuning.buff_interval_ms),
        }
    }

    pub fn interval(&self) -> f32 {
        self.gate.interval_ms
    }

    /// Roll for a pickup if the gate allows it
    ///
    /// Roughly a third of gate events are deliberately empty.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now_ms: f64,
        field: &PlayField,
        tuning: &Tuning,
        rng: &mut R,
        pickups: &mut Vec<Pickup>,
    ) -> BuffSpawn {
        if !self.gate.try_fire(now_ms) {
            return BuffSpawn::Waiting;
        }

        let Some(kind) = BuffKind::from_roll(rng.random::<f32>()) else {
            return BuffSpawn::Skipped;
        };

        let x = field.random_x(tuning.pickup_margin, rng);
        pickups.push(Pickup {
            kind,
            pos: Vec2::new(x, -tuning.pickup_spawn_height),
            radius: tuning.pickup_radius,
            speed: tuning.pickup_speed,
            pulse: rng.random_range(0.0..std::f32::consts::TAU),
        });
        log::trace!("Pickup spawned ({})", kind.as_str());
        BuffSpawn::Spawned(kind)
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        self.gate.reset(tuning.buff_interval_ms);
    }
}
