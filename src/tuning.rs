//! Data-driven game balance
//!
//! Every numeric constant the simulation reads: the difficulty curve, spawn
//! cadence, catalog sizing, buff durations, player defaults and particle
//! parameters. Any subset may be overridden from a JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Tunable game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty curve ===
    /// Baseline fall-speed multiplier
    pub gravity_base: f32,
    /// Weight of the early exponential ramp
    pub gravity_ramp: f32,
    /// Decay rate of the exponential ramp over normalized altitude
    pub gravity_ramp_rate: f32,
    /// Linear growth over normalized altitude
    pub gravity_linear: f32,
    pub gravity_min: f32,
    pub gravity_max: f32,
    /// Multiplier on the clamped gravity while SlowTime is active
    pub slow_time_factor: f32,

    // === Hazard spawner ===
    /// Spawn gate at the start of a session (ms)
    pub hazard_interval_ms: f32,
    /// Spawn gate floor (ms)
    pub hazard_interval_min_ms: f32,
    /// Interval reduction per unit of altitude
    pub hazard_interval_slope: f32,
    /// Largest total reduction the altitude can buy (ms)
    pub hazard_interval_max_reduction_ms: f32,
    /// Horizontal spawn margin from each side of the field
    pub hazard_margin: f32,
    /// How far below the bottom edge a hazard may fall before it is purged
    pub hazard_purge_margin: f32,
    /// Scale from descent coefficient × gravity to units per step
    pub hazard_speed_scale: f32,

    // === Catalog adapter ===
    /// Magnitude for a record without a usable diameter
    pub default_magnitude: f32,
    pub hazard_size_min: f32,
    pub hazard_size_max: f32,
    /// `size = ln(magnitude + offset) * scale`
    pub hazard_size_scale: f32,
    pub hazard_size_offset: f32,
    /// `descent = base + ln(magnitude + offset) * log_scale`
    pub descent_base: f32,
    pub descent_log_scale: f32,
    pub descent_log_offset: f32,
    /// Descent coefficient ceiling for catalog hazards
    pub descent_max: f32,
    pub synthetic_magnitude_min: f32,
    pub synthetic_magnitude_max: f32,
    pub synthetic_descent_min: f32,
    pub synthetic_descent_max: f32,

    // === Buff spawner ===
    /// Fixed spawn gate for pickups (ms)
    pub buff_interval_ms: f32,
    /// Pickup radius (also its collision half-extent)
    pub pickup_radius: f32,
    /// Horizontal spawn margin for pickups
    pub pickup_margin: f32,
    /// Pickup descent in units per step
    pub pickup_speed: f32,
    /// Spawn height above the top edge
    pub pickup_spawn_height: f32,
    /// Cosmetic pulse phase advance per step (radians)
    pub pickup_pulse_step: f32,
    /// How far below the bottom edge a pickup may fall before it is purged
    pub pickup_purge_margin: f32,

    // === Buff effects ===
    pub shield_ms: f32,
    pub double_score_ms: f32,
    pub slow_time_ms: f32,
    pub boost_ms: f32,
    /// Speed multiplier while Boost is active
    pub boost_factor: f32,
    /// Score change for ScorePlus (added) and ScoreMinus (subtracted)
    pub score_pickup_delta: f32,

    // === Progression ===
    /// Score/altitude gain per step
    pub base_gain: f32,
    /// Gain per step while DoubleScore is active
    pub double_gain: f32,

    // === Player ===
    pub player_lives: u32,
    pub player_half_size: f32,
    /// Units moved per step at full input deflection
    pub player_base_speed: f32,
    /// Start height as a fraction of the field height
    pub player_start_y_frac: f32,

    // === Particles ===
    /// Exhaust particles emitted per active step
    pub exhaust_per_tick: usize,
    /// Burst size on hazard impact
    pub impact_burst: usize,
    /// Burst size on pickup collection
    pub pickup_burst: usize,
    /// Downward acceleration per tick
    pub particle_gravity: f32,
    /// Exhaust lifetime range in ticks, `[min, max)`
    pub exhaust_life_min: u32,
    pub exhaust_life_max: u32,
    /// Burst lifetime range in ticks, `[min, max)`
    pub burst_life_min: u32,
    pub burst_life_max: u32,
    /// Burst speed range, `[min, max)`
    pub burst_speed_min: f32,
    pub burst_speed_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_base: 0.12,
            gravity_ramp: 0.6,
            gravity_ramp_rate: 6.0,
            gravity_linear: 1.2,
            gravity_min: 0.04,
            gravity_max: 0.36,
            slow_time_factor: 0.4,

            hazard_interval_ms: 900.0,
            hazard_interval_min_ms: 400.0,
            hazard_interval_slope: 0.6,
            hazard_interval_max_reduction_ms: 500.0,
            hazard_margin: 40.0,
            hazard_purge_margin: 120.0,
            hazard_speed_scale: 100.0,

            default_magnitude: 50.0,
            hazard_size_min: 18.0,
            hazard_size_max: 120.0,
            hazard_size_scale: 8.0,
            hazard_size_offset: 10.0,
            descent_base: 0.1,
            descent_log_scale: 0.002,
            descent_log_offset: 20.0,
            descent_max: 0.7,
            synthetic_magnitude_min: 12.0,
            synthetic_magnitude_max: 80.0,
            synthetic_descent_min: 0.12,
            synthetic_descent_max: 0.62,

            buff_interval_ms: 2500.0,
            pickup_radius: 16.0,
            pickup_margin: 30.0,
            pickup_speed: 1.0,
            pickup_spawn_height: 30.0,
            pickup_pulse_step: 0.08,
            pickup_purge_margin: 40.0,

            shield_ms: 5000.0,
            double_score_ms: 6000.0,
            slow_time_ms: 5000.0,
            boost_ms: 4000.0,
            boost_factor: 1.7,
            score_pickup_delta: 100.0,

            base_gain: 0.05,
            double_gain: 0.1,

            player_lives: 3,
            player_half_size: 20.0,
            player_base_speed: 4.0,
            player_start_y_frac: 0.8,

            exhaust_per_tick: 2,
            impact_burst: 14,
            pickup_burst: 8,
            particle_gravity: 0.03,
            exhaust_life_min: 40,
            exhaust_life_max: 60,
            burst_life_min: 20,
            burst_life_max: 40,
            burst_speed_min: 0.5,
            burst_speed_max: 2.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall spawning or corrupt the simulation
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("gravity_max", self.gravity_max),
            ("slow_time_factor", self.slow_time_factor),
            ("hazard_interval_ms", self.hazard_interval_ms),
            ("hazard_interval_min_ms", self.hazard_interval_min_ms),
            ("hazard_speed_scale", self.hazard_speed_scale),
            ("hazard_size_min", self.hazard_size_min),
            ("hazard_size_scale", self.hazard_size_scale),
            ("hazard_size_offset", self.hazard_size_offset),
            ("descent_log_offset", self.descent_log_offset),
            ("descent_max", self.descent_max),
            ("buff_interval_ms", self.buff_interval_ms),
            ("pickup_radius", self.pickup_radius),
            ("pickup_speed", self.pickup_speed),
            ("shield_ms", self.shield_ms),
            ("double_score_ms", self.double_score_ms),
            ("slow_time_ms", self.slow_time_ms),
            ("boost_ms", self.boost_ms),
            ("boost_factor", self.boost_factor),
            ("base_gain", self.base_gain),
            ("double_gain", self.double_gain),
            ("player_half_size", self.player_half_size),
            ("player_base_speed", self.player_base_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("gravity_base", self.gravity_base),
            ("gravity_ramp", self.gravity_ramp),
            ("gravity_ramp_rate", self.gravity_ramp_rate),
            ("gravity_linear", self.gravity_linear),
            ("gravity_min", self.gravity_min),
            ("hazard_interval_slope", self.hazard_interval_slope),
            ("hazard_interval_max_reduction_ms", self.hazard_interval_max_reduction_ms),
            ("hazard_margin", self.hazard_margin),
            ("hazard_purge_margin", self.hazard_purge_margin),
            ("pickup_margin", self.pickup_margin),
            ("pickup_spawn_height", self.pickup_spawn_height),
            ("pickup_pulse_step", self.pickup_pulse_step),
            ("pickup_purge_margin", self.pickup_purge_margin),
            ("default_magnitude", self.default_magnitude),
            ("descent_base", self.descent_base),
            ("descent_log_scale", self.descent_log_scale),
            ("synthetic_magnitude_min", self.synthetic_magnitude_min),
            ("synthetic_descent_min", self.synthetic_descent_min),
            ("score_pickup_delta", self.score_pickup_delta),
            ("particle_gravity", self.particle_gravity),
            ("burst_speed_min", self.burst_speed_min),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        let ordered = [
            ("hazard_interval", self.hazard_interval_min_ms, self.hazard_interval_ms),
            ("gravity", self.gravity_min, self.gravity_max),
            ("hazard_size", self.hazard_size_min, self.hazard_size_max),
            ("synthetic_magnitude", self.synthetic_magnitude_min, self.synthetic_magnitude_max),
            ("synthetic_descent", self.synthetic_descent_min, self.synthetic_descent_max),
        ];
        for (name, min, max) in ordered {
            if min > max {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} minimum ({min}) exceeds its maximum ({max})"
                )));
            }
        }

        // Half-open ranges must not be empty
        if self.burst_speed_min >= self.burst_speed_max {
            return Err(EngineError::InvalidConfig(format!(
                "burst_speed range [{}, {}) is empty",
                self.burst_speed_min, self.burst_speed_max
            )));
        }
        let lifetimes = [
            ("exhaust_life", self.exhaust_life_min, self.exhaust_life_max),
            ("burst_life", self.burst_life_min, self.burst_life_max),
        ];
        for (name, min, max) in lifetimes {
            if min == 0 || min >= max {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} range [{min}, {max}) must be non-empty and start above zero"
                )));
            }
        }
        if self.player_lives == 0 {
            return Err("player_lives must be at least 1".to_string().into());
        }
        if !(0.0..=1.0).contains(&self.player_start_y_frac) {
            return Err(EngineError::InvalidConfig(format!(
                "player_start_y_frac must be within [0, 1], got {}",
                self.player_start_y_frac
            )));
        }
        Ok(())
    }
}
