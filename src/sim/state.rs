//! Game state and core simulation types
//!
//! The engine state for one session: player, live entity collections,
//! spawners, progression and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::buffs::{BuffKind, BuffTable};
use super::catalog::Catalog;
use super::particles::{Particle, ParticleSystem};
use super::progression::Progression;
use super::spawner::{BuffSpawner, HazardSpawner};
use crate::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use crate::sanitize;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Engine-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Not started, or waiting for the session controller after a game over
    #[default]
    Idle,
    /// Spawners, collisions and progression all run
    Active,
}

/// Visible play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Uniform horizontal position inside `[margin, width - margin)`.
    /// Falls back to the center when the field is narrower than both margins.
    pub fn random_x<R: Rng>(&self, margin: f32, rng: &mut R) -> f32 {
        let lo = margin;
        let hi = self.width - margin;
        if hi > lo {
            rng.random_range(lo..hi)
        } else {
            self.width / 2.0
        }
    }
}

/// Where a hazard's size and speed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardOrigin {
    /// Backed by a real catalog record
    Catalog,
    /// Procedurally generated
    Synthetic,
}

/// A falling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    /// Display diameter
    pub size: f32,
    /// Base descent coefficient (scaled by the difficulty curve)
    pub descent: f32,
    /// Diameter-like value driving size and speed
    pub magnitude: f32,
    pub origin: HazardOrigin,
    pub name: Option<String>,
}

impl Hazard {
    /// Collision half-extent on both axes
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// Fall for `steps` simulation steps under the given gravity multiplier
    pub fn advance(&mut self, gravity: f32, steps: f32, speed_scale: f32) {
        self.pos.y += self.descent * speed_scale * gravity * steps;
    }
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: BuffKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Units per step
    pub speed: f32,
    /// Cosmetic pulse phase (radians)
    pub pulse: f32,
}

impl Pickup {
    /// Collision half-extent on both axes
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.radius
    }

    pub fn advance(&mut self, steps: f32, pulse_step: f32) {
        self.pos.y += self.speed * steps;
        self.pulse = (self.pulse + pulse_step * steps) % std::f32::consts::TAU;
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub half_size: f32,
    pub base_speed: f32,
    /// Equals `base_speed` unless Boost is active
    pub speed: f32,
    pub lives: u32,
    pub score: f32,
    pub buffs: BuffTable,
}

impl PlayerState {
    pub fn new(field: &PlayField, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height * tuning.player_start_y_frac),
            half_size: tuning.player_half_size,
            base_speed: tuning.player_base_speed,
            speed: tuning.player_base_speed,
            lives: tuning.player_lives,
            score: 0.0,
            buffs: BuffTable::default(),
        }
    }

    /// Move by the input intent (each axis in [-1, 1]) and keep the craft on screen
    pub fn apply_move(&mut self, axis: Vec2, steps: f32, field: &PlayField) {
        let axis = Vec2::new(unit_axis(axis.x), unit_axis(axis.y));
        self.pos += axis * self.speed * steps;

        let min = Vec2::splat(self.half_size);
        let max = Vec2::new(field.width - self.half_size, field.height - self.half_size);
        self.pos = self.pos.max(min).min(max.max(min));
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

fn unit_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Things that happened during a tick, for audio, screen shake and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardSpawned { origin: HazardOrigin },
    PickupSpawned(BuffKind),
    /// A hazard struck the player; `shielded` hits cost no life
    HazardHit { shielded: bool },
    PickupCollected(BuffKind),
    BuffExpired(BuffKind),
    /// Lives reached zero; the engine has already reset itself to Idle
    GameOver { score: f32, altitude: f32 },
}

/// Complete engine state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: EnginePhase,
    pub field: PlayField,
    pub tuning: Tuning,
    pub player: PlayerState,
    /// Live hazards, in spawn order
    pub hazards: Vec<Hazard>,
    /// Live pickups, in spawn order
    pub pickups: Vec<Pickup>,
    pub progression: Progression,
    pub hazard_spawner: HazardSpawner,
    pub buff_spawner: BuffSpawner,
    /// Read-only hazard catalog supplied by the session controller
    pub catalog: Catalog,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Simulated session clock (ms since the last reset)
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle engine with default tuning and an empty catalog
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, PlayField::default(), Tuning::default(), &Settings::default())
    }

    pub fn with_config(seed: u64, field: PlayField, tuning: Tuning, settings: &Settings) -> Self {
        Self {
            seed,
            phase: EnginePhase::Idle,
            player: PlayerState::new(&field, &tuning),
            hazards: Vec::new(),
            pickups: Vec::new(),
            progression: Progression::default(),
            hazard_spawner: HazardSpawner::new(&tuning),
            buff_spawner: BuffSpawner::new(&tuning),
            catalog: Catalog::default(),
            particles: ParticleSystem::new(seed, settings.max_particles()),
            clock_ms: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            field,
            tuning,
        }
    }

    /// Replace the hazard catalog
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Session controller entry into `Active`
    pub fn start(&mut self) {
        if self.phase == EnginePhase::Idle {
            log::info!(
                "Session started (seed {}, {} catalog records)",
                self.seed,
                self.catalog.len()
            );
            self.phase = EnginePhase::Active;
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == EnginePhase::Active
    }

    /// Full reset after a game over: player, entities, altitude, score,
    /// spawn timers and the session clock all return to their initial values.
    pub fn reset(&mut self) {
        self.player = PlayerState::new(&self.field, &self.tuning);
        self.hazards.clear();
        self.pickups.clear();
        self.particles.clear();
        self.progression.reset();
        self.hazard_spawner.reset(&self.tuning);
        self.buff_spawner.reset(&self.tuning);
        self.clock_ms = 0.0;
        self.time_ticks = 0;
        self.phase = EnginePhase::Idle;
    }

    /// Resize the play field, keeping the player inside it
    pub fn resize(&mut self, field: PlayField) {
        self.field = field;
        self.player.apply_move(Vec2::ZERO, 0.0, &field);
    }

    pub fn altitude(&self) -> f32 {
        self.progression.altitude
    }

    /// Read-only view for the render sink
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            field: self.field,
            altitude: self.progression.altitude,
            player: &self.player,
            hazards: &self.hazards,
            pickups: &self.pickups,
            particles: self.particles.particles(),
        }
    }
}

/// Borrowed per-tick view of everything a renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: EnginePhase,
    pub field: PlayField,
    pub altitude: f32,
    pub player: &'a PlayerState,
    pub hazards: &'a [Hazard],
    pub pickups: &'a [Pickup],
    pub particles: &'a [Particle],
}
