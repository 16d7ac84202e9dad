//! Cosmetic particle feedback
//!
//! Fire-and-forget: callers emit bursts, nothing reads particles back except
//! the render snapshot. The system owns its own RNG so enabling or disabling
//! particles never changes the gameplay random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Exhaust trail color (cyan)
pub const EXHAUST_COLOR: u32 = 0x00FFFFFF;
/// Unshielded impact (orange)
pub const IMPACT_COLOR: u32 = 0xFF8833FF;
/// Hit absorbed by the shield
pub const SHIELD_COLOR: u32 = 0x00CCFFFF;

/// Decorrelates the particle stream from the gameplay stream for the same seed
const STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub size: f32,
    /// RGBA color tag
    pub color: u32,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            max_particles,
            rng: Pcg32::seed_from_u64(seed ^ STREAM_SALT),
        }
    }

    /// Thrust-style drizzle: slow sideways drift, falling away from the emitter
    pub fn emit(&mut self, pos: Vec2, color: u32, count: usize, tuning: &Tuning) {
        for _ in 0..self.room(count) {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 1.5,
                self.rng.random::<f32>() * 1.5 + 0.5,
            );
            let particle = Particle {
                pos,
                vel,
                life: lifetime(&mut self.rng, tuning.exhaust_life_min, tuning.exhaust_life_max),
                size: self.rng.random::<f32>() * 2.0 + 1.0,
                color,
            };
            self.particles.push(particle);
        }
    }

    /// Radial burst for impacts and pickups
    pub fn burst(&mut self, pos: Vec2, color: u32, count: usize, tuning: &Tuning) {
        for _ in 0..self.room(count) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = if tuning.burst_speed_max > tuning.burst_speed_min {
                self.rng.random_range(tuning.burst_speed_min..tuning.burst_speed_max)
            } else {
                tuning.burst_speed_min
            };
            let particle = Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: lifetime(&mut self.rng, tuning.burst_life_min, tuning.burst_life_max),
                size: self.rng.random_range(1.5..3.5),
                color,
            };
            self.particles.push(particle);
        }
    }

    /// Age every particle by one tick and drop the dead ones
    pub fn update(&mut self, tuning: &Tuning) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += tuning.particle_gravity;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn room(&self, wanted: usize) -> usize {
        wanted.min(self.max_particles.saturating_sub(self.particles.len()))
    }
}

/// Lifetime in ticks from `[min, max)`, never zero
fn lifetime(rng: &mut Pcg32, min: u32, max: u32) -> u32 {
    let life = if max > min { rng.random_range(min..max) } else { min };
    life.max(1)
}
