//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod buffs;
pub mod catalog;
pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use buffs::{BuffEffect, BuffKind, BuffStatus, BuffTable};
pub use catalog::{Catalog, CatalogRecord, hazard_from_record};
pub use collision::{CollisionReport, overlaps};
pub use difficulty::{gravity, hazard_spawn_interval};
pub use particles::{Particle, ParticleSystem};
pub use progression::Progression;
pub use spawner::{BuffSpawn, BuffSpawner, HazardSpawner, SpawnGate};
pub use state::{
    EnginePhase, GameEvent, GameState, Hazard, HazardOrigin, Pickup, PlayField, PlayerState,
    Snapshot,
};
pub use tick::{TickInput, tick};
